//! Timestamped key-value cache.
//!
//! The cache remembers the outcome of expensive lookups (currently: which
//! upstream release is the latest) together with the epoch second at which
//! the value was recorded. It is not a source of truth: deleting it only costs
//! one extra lookup on the next run.
//!
//! # Architecture
//! - [`VersionStore`]: the narrow `get`/`put` interface consumers depend on.
//! - [`FileStore`]: one two-line file per key (`<timestamp>\n<value>\n`).
//! - `MemoryStore` (feature `mock`): an in-process store for tests.
//! - [`Clock`]: where "now" comes from, so freshness can be tested without
//!   waiting for real time to pass.

mod clock;
pub mod error;
mod file;
#[cfg(feature = "mock")]
mod memory;
mod store;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::file::FileStore;
#[cfg(feature = "mock")]
pub use crate::memory::MemoryStore;
pub use crate::store::{Entry, VersionStore};
