//! File-backed cache store.
//!
//! Each key maps to one file directly inside the store's root directory. The
//! file holds exactly two lines: the epoch timestamp of the entry and its
//! value.
//!
//! ```text
//! 1697500000
//! 5.2.0
//! ```

use crate::error::{ErrorKind, Result};
use crate::store::{Entry, VersionStore};
use exn::ResultExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The root directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            exn::bail!(ErrorKind::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    fn parse(text: &str) -> Option<Entry> {
        let mut lines = text.lines();
        let timestamp = lines.next()?.trim().parse::<i64>().ok()?;
        let value = lines.next()?.trim();
        if value.is_empty() {
            return None;
        }
        Some(Entry::new(timestamp, value))
    }
}

impl VersionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Entry>> {
        let path = self.path_for(key)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).or_raise(|| ErrorKind::Read(path)),
        };
        let entry = Self::parse(&text);
        if entry.is_none() {
            tracing::warn!(path = %path.display(), "Ignoring malformed cache entry");
        }
        Ok(entry)
    }

    fn put(&self, key: &str, timestamp: i64, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if value.trim().is_empty() || value.contains(['\n', '\r']) {
            exn::bail!(ErrorKind::InvalidValue(key.to_string()));
        }
        std::fs::create_dir_all(&self.root).or_raise(|| ErrorKind::Write(path.clone()))?;
        // Write next to the target and rename over it so readers never see a
        // half-written entry.
        let mut tmp = NamedTempFile::new_in(&self.root).or_raise(|| ErrorKind::Write(path.clone()))?;
        writeln!(tmp, "{timestamp}\n{value}").or_raise(|| ErrorKind::Write(path.clone()))?;
        tmp.persist(&path).map_err(|e| e.error).or_raise(|| ErrorKind::Write(path.clone()))?;
        tracing::trace!(path = %path.display(), timestamp, value, "Cache entry written");
        Ok(())
    }
}
