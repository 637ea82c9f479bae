use crate::error::{ErrorKind, Result};
use crate::process::{self, args};
use std::path::{Path, PathBuf};

/// Network access needed by the build: following a "latest release"
/// redirect and fetching archives.
pub trait Transport: Send + Sync {
    /// Requests `url` without following redirects and returns the redirect
    /// target.
    fn redirect_target(&self, url: &str) -> Result<String>;

    /// Downloads `url` into `dest`, overwriting it. Any non-2xx response,
    /// interrupted transfer or network error is a failure.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`Transport`] backed by `curl`.
#[derive(Debug, Clone)]
pub struct Curl {
    path: PathBuf,
}

impl Curl {
    const TOOL: &'static str = "curl";

    pub fn discover() -> Result<Self> {
        Ok(Self { path: process::discover(Self::TOOL, &["curl"])? })
    }
}

impl Transport for Curl {
    fn redirect_target(&self, url: &str) -> Result<String> {
        // HEAD request; `%{redirect_url}` is empty when the response is not a redirect.
        let args = args![
            "--silent",
            "--show-error",
            "--fail",
            "--head",
            "--output",
            "/dev/null",
            "--write-out",
            "%{redirect_url}",
            url,
        ];
        let output = process::run(Self::TOOL, &self.path, &args)?;
        let target = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if target.is_empty() {
            exn::bail!(ErrorKind::Output { tool: Self::TOOL, message: format!("{url} did not redirect") });
        }
        Ok(target)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let args = args!["--silent", "--show-error", "--fail", "--location", "--output", dest, url];
        process::run(Self::TOOL, &self.path, &args)?;
        Ok(())
    }
}
