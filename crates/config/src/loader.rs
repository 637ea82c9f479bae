use crate::error::{ErrorKind, Result};
use crate::settings::{APPLICATION, ORGANIZATION, Overrides, QUALIFIER, Settings};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override settings
/// (`GHOSTYUM_ROOT`, `GHOSTYUM_SIGN_KEY`, ...).
pub const ENV_PREFIX: &str = "GHOSTYUM_";

/// `config.toml` in the user's configuration directory, if there is one.
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|dirs| dirs.config_dir().join("config.toml"))
}

fn figment(config_file: Option<&Path>, overrides: &Overrides) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    match config_file {
        Some(path) => {
            if !path.is_file() {
                exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file_exact(path));
        },
        None => match default_config_file() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Using default configuration file");
                figment = figment.merge(Toml::file_exact(path));
            },
            _ => {},
        },
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX)).merge(Serialized::defaults(overrides)))
}

/// Loads settings from every layer. `config_file`, when given, must exist.
pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let settings: Settings = figment(config_file, overrides)?.extract().or_raise(|| ErrorKind::Invalid)?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}
