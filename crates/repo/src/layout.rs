//! Repository directory convention.
//!
//! ```text
//! <root>/
//! └── <version>/
//!     └── <dist>/
//!         ├── SRPMS/      source packages + repodata/
//!         └── <arch>/     binary packages + repodata/
//! ```

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_segment;
use std::path::{Path, PathBuf};

/// Directory holding source packages within a `{version, dist}` subtree.
pub const SOURCE_DIR: &str = "SRPMS";

/// Paths of one `{version, dist}` subtree of the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    base: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, version: &str, dist: &str) -> Result<Self> {
        let root = root.into();
        let base = root.join(validate_segment(version)?).join(validate_segment(dist)?);
        Ok(Self { root, base })
    }

    /// The repository root shared by every version.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<version>/<dist>`
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// `<root>/<version>/<dist>/SRPMS`
    pub fn source_dir(&self) -> PathBuf {
        self.base.join(SOURCE_DIR)
    }

    /// `<root>/<version>/<dist>/<arch>`
    pub fn arch_dir(&self, arch: &str) -> Result<PathBuf> {
        Ok(self.base.join(validate_segment(arch)?))
    }

    /// Creates the source subtree and, when given, the `arch` subtree
    /// (including all parents). Existing directories are left alone.
    pub fn ensure(&self, arch: Option<&str>) -> Result<()> {
        let mut dirs = vec![self.source_dir()];
        if let Some(arch) = arch {
            dirs.push(self.arch_dir(arch)?);
        }
        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|e| ErrorKind::from_io(e, &dir))?;
            tracing::trace!(dir = %dir.display(), "Repository directory ready");
        }
        Ok(())
    }
}
