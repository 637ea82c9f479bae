//! Pipeline Error Types
//!
//! Every variant is fatal to the run. Failures the pipeline tolerates
//! (signing, metadata regeneration) never become an [`ErrorKind`]; they are
//! logged where they happen.

use crate::Phase;
use derive_more::{Display, Error};
use std::path::PathBuf;

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Repository directories could not be derived or created.
    #[display("unable to prepare repository layout")]
    Layout,
    /// The repository could not be searched for existing artifacts.
    #[display("unable to check repository for existing artifacts")]
    Registry,
    #[display("spec file is not a regular file: {}", _0.display())]
    MissingSpec(#[error(not(source))] PathBuf),
    #[display("sources directory is not a directory: {}", _0.display())]
    MissingSources(#[error(not(source))] PathBuf),
    #[display("source package to rebuild is missing: {}", _0.display())]
    MissingSourcePackage(#[error(not(source))] PathBuf),
    /// The upstream source archive could not be staged.
    #[display("unable to fetch source archive")]
    Fetch,
    /// The private result directory could not be created.
    #[display("unable to create build result directory")]
    Workspace,
    /// The isolated builder failed. Never retried.
    #[display("{_0} package build failed")]
    Build(#[error(not(source))] Phase),
    /// The builder exited cleanly but produced nothing recognisable.
    #[display("{_0} package build produced no packages")]
    NoArtifacts(#[error(not(source))] Phase),
    /// A built artifact could not be moved into the repository.
    #[display("unable to publish {}", _0.display())]
    Publish(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
