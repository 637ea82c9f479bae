use crate::error::Result;
use crate::process::{self, args};
use std::path::{Path, PathBuf};

/// Regenerates repository metadata for one directory of packages.
pub trait Indexer: Send + Sync {
    fn index(&self, dir: &Path) -> Result<()>;
}

/// [`Indexer`] backed by `createrepo_c` (or the older Python `createrepo`).
#[derive(Debug, Clone)]
pub struct CreateRepo {
    path: PathBuf,
}

impl CreateRepo {
    const TOOL: &'static str = "createrepo";

    pub fn discover() -> Result<Self> {
        Ok(Self { path: process::discover(Self::TOOL, &["createrepo_c", "createrepo"])? })
    }
}

impl Indexer for CreateRepo {
    fn index(&self, dir: &Path) -> Result<()> {
        process::run(Self::TOOL, &self.path, &args!["--update", dir])?;
        Ok(())
    }
}
