use clap::{ArgAction, Parser};
use ghostyum_config::Overrides;
use std::path::PathBuf;

/// Build Ghost source and binary RPMs with mock and publish them into a
/// versioned yum repository.
///
/// Settings not given on the command line come from `GHOSTYUM_*` environment
/// variables, then the configuration file, then built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "ghostyum", version, about, long_about)]
pub struct Cli {
    /// mock build-root profile [default: epel-6-x86_64]
    #[arg(short, long, value_name = "PROFILE")]
    pub root: Option<String>,

    /// Architecture of the binary packages [default: the profile's target_arch]
    #[arg(short, long)]
    pub arch: Option<String>,

    /// Only build the source package
    #[arg(short, long)]
    pub srpm_only: bool,

    /// Configuration file [default: config.toml in the user config directory]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds a resolved latest version is reused before asking upstream again
    #[arg(long, value_name = "SECONDS")]
    pub cache_timeout: Option<u64>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Release to build [default: the latest upstream release]
    #[arg(value_name = "VERSION")]
    pub release: Option<String>,
}

impl Cli {
    /// The flags that were actually given.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            arch: self.arch.clone(),
            version: self.release.clone(),
            srpm_only: self.srpm_only.then_some(true),
            cache_timeout: self.cache_timeout,
        }
    }
}
