//! Which upstream release to build, and its source archive.
//!
//! - [`VersionResolver`]: asks upstream for the latest release, remembering
//!   the answer in a [`VersionStore`](ghostyum_cache::VersionStore) for a
//!   configurable number of seconds.
//! - [`SourceFetcher`]: makes sure `ghost-<version>.zip` is present in the
//!   sources directory, downloading it when it is not.

pub mod error;
mod fetcher;
mod resolver;

pub use crate::fetcher::{SourceFetcher, archive_name};
pub use crate::resolver::{LATEST_VERSION_KEY, VersionResolver};
