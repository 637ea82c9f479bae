//! Release Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A release error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The version cache could not be consulted.
    #[display("version cache unavailable")]
    Cache,
    /// The upstream "latest release" lookup failed outright.
    #[display("unable to look up the latest release at {_0}")]
    Lookup(#[error(not(source))] String),
    /// The lookup succeeded but named no recognisable version.
    #[display("no release version found in {_0:?}")]
    NoVersion(#[error(not(source))] String),
    /// The download URL template is unusable.
    #[display("invalid download URL template: {_0}")]
    UrlTemplate(#[error(not(source))] String),
    /// The source archive could not be downloaded.
    #[display("unable to download {_0}")]
    Download(#[error(not(source))] String),
    /// The archive could not be stored in the sources directory.
    #[display("unable to store source archive: {}", _0.display())]
    Store(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::Download(_))
    }
}
