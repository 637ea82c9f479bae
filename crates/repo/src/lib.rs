//! On-disk package repository.
//!
//! The repository is a plain directory tree keyed by release version and
//! distribution tag (see [`Layout`]). Each leaf directory is one yum
//! repository whose contents are tracked by a [`Registry`]: existence checks
//! go through [`ArtifactPattern`]s matched against a directory listing, and
//! new artifacts are moved in with [`Registry::publish`].
//!
//! Nothing here locks anything. Two runs against the same tree at the same
//! time will race; callers have to serialize them.

pub mod error;
mod layout;
mod ordering;
mod path;
mod pattern;
mod registry;

pub use crate::layout::{Layout, SOURCE_DIR};
pub use crate::ordering::compare_names;
pub use crate::path::validate as validate_segment;
pub use crate::pattern::ArtifactPattern;
pub use crate::registry::Registry;
