use crate::error::Result;
use crate::process::{self, args};
use std::path::{Path, PathBuf};

/// Adds a signature to a built package, in place.
pub trait Signer: Send + Sync {
    /// `key` names the signing identity (a GPG user id or key id).
    fn sign(&self, key: &str, artifact: &Path) -> Result<()>;
}

/// [`Signer`] backed by `rpmsign --addsign`.
#[derive(Debug, Clone)]
pub struct RpmSign {
    path: PathBuf,
}

impl RpmSign {
    const TOOL: &'static str = "rpmsign";

    pub fn discover() -> Result<Self> {
        Ok(Self { path: process::discover(Self::TOOL, &["rpmsign"])? })
    }
}

impl Signer for RpmSign {
    fn sign(&self, key: &str, artifact: &Path) -> Result<()> {
        let args = args!["--addsign", "--define", format!("_gpg_name {key}"), artifact];
        process::run(Self::TOOL, &self.path, &args)?;
        Ok(())
    }
}
