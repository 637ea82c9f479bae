use crate::error::{ErrorKind, Result};
use crate::indexer::Indexer;
use crate::signer::Signer;
use std::path::Path;

/// Stand-in for an optional tool that is not installed. Every call fails
/// with [`ErrorKind::NotFound`], leaving the decision about how much that
/// matters to the caller.
#[derive(Debug, Clone, Copy)]
pub struct Unavailable(pub &'static str);

impl Signer for Unavailable {
    fn sign(&self, _key: &str, _artifact: &Path) -> Result<()> {
        exn::bail!(ErrorKind::NotFound(self.0));
    }
}

impl Indexer for Unavailable {
    fn index(&self, _dir: &Path) -> Result<()> {
        exn::bail!(ErrorKind::NotFound(self.0));
    }
}
