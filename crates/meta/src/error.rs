//! Metadata Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A metadata error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Version strings must be exactly three dot-separated numeric components.
    #[display("invalid release version: {_0:?}")]
    InvalidVersion(#[error(not(source))] String),
    /// The spec file could not be read.
    #[display("unable to read spec file: {}", _0.display())]
    SpecUnreadable(#[error(not(source))] PathBuf),
    /// The spec file declares no `Release:` field with a numeric counter.
    #[display("spec file has no numeric Release field: {}", _0.display())]
    MissingRelease(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
