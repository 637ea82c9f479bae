//! Directory-listing artifact registry.
//!
//! One [`Registry`] covers one repository subtree (`SRPMS` or an arch
//! directory). It answers "is there already an artifact matching this
//! pattern?" and moves freshly built artifacts into place.

use crate::error::{ErrorKind, Result};
use crate::{ArtifactPattern, compare_names};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    dir: PathBuf,
}

impl Registry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Names of the regular files directly inside the directory, oldest
    /// first by [`compare_names`].
    ///
    /// A directory that doesn't exist yet is simply empty. Subdirectories
    /// (such as `repodata/`) and names that aren't valid UTF-8 are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => exn::bail!(ErrorKind::from_io(e, &self.dir)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, &self.dir))?;
            // Follows symlinks; a dangling link is not an artifact.
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::trace!(?name, "Skipping non UTF-8 file name"),
            }
        }
        names.sort_by(|a, b| compare_names(a, b));
        Ok(names)
    }

    /// The newest file name matching `pattern`, by [`compare_names`].
    pub fn find(&self, pattern: &ArtifactPattern) -> Result<Option<String>> {
        Ok(self.list()?.into_iter().rfind(|name| pattern.matches(name)))
    }

    pub fn exists(&self, pattern: &ArtifactPattern) -> Result<bool> {
        Ok(self.find(pattern)?.is_some())
    }

    /// Moves `artifact` into the registry directory under its own file name,
    /// replacing any file of the same name, and returns that name.
    ///
    /// Within one filesystem this is a single rename. Across filesystems the
    /// file is copied to a hidden name next to its destination, renamed into
    /// place, and only then removed from its origin.
    pub fn publish(&self, artifact: &Path) -> Result<String> {
        let name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ErrorKind::NotFound(artifact.to_path_buf()))?
            .to_string();
        let dest = self.path_of(&name);
        match std::fs::rename(artifact, &dest) {
            Ok(()) => {},
            Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => self.copy_across(artifact, &dest, &name)?,
            Err(e) => exn::bail!(ErrorKind::from_io(e, artifact)),
        }
        tracing::debug!(from = %artifact.display(), to = %dest.display(), "Artifact published");
        Ok(name)
    }

    fn copy_across(&self, artifact: &Path, dest: &Path, name: &str) -> Result<()> {
        let staging = self.path_of(&format!(".{name}.partial"));
        if let Err(e) = std::fs::copy(artifact, &staging) {
            _ = std::fs::remove_file(&staging);
            exn::bail!(ErrorKind::from_io(e, artifact));
        }
        std::fs::rename(&staging, dest).map_err(|e| ErrorKind::from_io(e, dest))?;
        if let Err(e) = std::fs::remove_file(artifact) {
            // The artifact is already published; a stray copy in a private
            // result directory is not worth failing the run over.
            tracing::warn!(
                path = %artifact.display(),
                error = %e,
                "Could not remove published artifact from its origin"
            );
        }
        Ok(())
    }
}
