use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use ghostyum_meta::ReleaseVersion;
use ghostyum_tools::Transport;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

const VERSION_PLACEHOLDER: &str = "{version}";

/// File name of the upstream source archive for `version`.
///
/// ```
/// # use ghostyum_meta::ReleaseVersion;
/// let version: ReleaseVersion = "5.2.0".parse().unwrap();
/// assert_eq!(ghostyum_release::archive_name(&version), "ghost-5.2.0.zip");
/// ```
pub fn archive_name(version: &ReleaseVersion) -> String {
    format!("ghost-{version}.zip")
}

/// Ensures the source archive of a release is present in a directory.
pub struct SourceFetcher {
    transport: Arc<dyn Transport>,
    url_template: String,
}

impl SourceFetcher {
    /// `url_template` must contain `{version}`, e.g.
    /// `https://ghost.org/zip/ghost-{version}.zip`.
    pub fn new(transport: Arc<dyn Transport>, url_template: impl Into<String>) -> Self {
        Self { transport, url_template: url_template.into() }
    }

    pub fn url_for(&self, version: &ReleaseVersion) -> Result<String> {
        if !self.url_template.contains(VERSION_PLACEHOLDER) {
            exn::bail!(ErrorKind::UrlTemplate(self.url_template.clone()));
        }
        Ok(self.url_template.replace(VERSION_PLACEHOLDER, version.as_str()))
    }

    /// Returns the archive path, downloading it first if it is missing.
    ///
    /// An existing file is trusted as-is. A download lands in a temporary
    /// file inside `dest_dir` and is renamed into place only once complete,
    /// so an interrupted run never leaves a truncated archive behind.
    #[tracing::instrument(level = "debug", skip(self, dest_dir))]
    pub fn ensure(&self, version: &ReleaseVersion, dest_dir: &Path) -> Result<PathBuf> {
        let dest = dest_dir.join(archive_name(version));
        if dest.is_file() {
            tracing::debug!(path = %dest.display(), "Source archive already present");
            return Ok(dest);
        }

        let url = self.url_for(version)?;
        tracing::info!(%url, "Downloading source archive");
        let tmp = NamedTempFile::new_in(dest_dir).or_raise(|| ErrorKind::Store(dest.clone()))?;
        self.transport.download(&url, tmp.path()).or_raise(|| ErrorKind::Download(url.clone()))?;
        tmp.persist(&dest).map_err(|e| e.error).or_raise(|| ErrorKind::Store(dest.clone()))?;
        tracing::info!(path = %dest.display(), "Source archive stored");
        Ok(dest)
    }
}
