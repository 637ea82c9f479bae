//! Metadata for a package build.
//!
//! Everything in this crate is derived from small, externally-owned text
//! sources: the upstream release version, the RPM spec file and the mock
//! build-root profile. Nothing here performs network access or writes to disk.
//!
//! - [`ReleaseVersion`]: the strict `MAJOR.MINOR.PATCH` identifier being built.
//! - [`SpecInfo`]: facts read once from the spec file (its `Release:` counter).
//! - [`ProfileInspector`]: `dist` tag and default architecture of a mock profile.
//! - [`naming`]: expected file names of source and binary packages.

mod consts;
pub mod error;
pub mod naming;
mod profile;
mod spec;
mod version;

pub use crate::profile::ProfileInspector;
pub use crate::spec::SpecInfo;
pub use crate::version::ReleaseVersion;
