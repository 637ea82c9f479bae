//! External tools the build drives.
//!
//! Each tool hides behind a narrow trait whose methods block until the tool
//! finishes and return either success or an [`Error`](error::Error) carrying
//! the tool's own diagnostics. Policy (what is fatal, what is merely logged)
//! belongs to the callers, not to this crate.
//!
//! | Trait              | Process-backed implementation |
//! |--------------------|-------------------------------|
//! | [`PackageBuilder`] | [`MockChroot`] (`mock`)       |
//! | [`Signer`]         | [`RpmSign`] (`rpmsign`)       |
//! | [`Indexer`]        | [`CreateRepo`] (`createrepo_c`/`createrepo`) |
//! | [`Transport`]      | [`Curl`] (`curl`)             |
//!
//! Recording fakes for every trait live in [`fakes`] behind the `mock`
//! feature.

mod builder;
pub mod error;
#[cfg(feature = "mock")]
pub mod fakes;
mod indexer;
mod process;
mod signer;
mod transport;
mod unavailable;

pub use crate::builder::{BinaryBuild, MockChroot, PackageBuilder, SourceBuild};
pub use crate::indexer::{CreateRepo, Indexer};
pub use crate::signer::{RpmSign, Signer};
pub use crate::transport::{Curl, Transport};
pub use crate::unavailable::Unavailable;
use std::sync::Arc;

/// The full set of tools a build run uses.
///
/// Handles are reference counted so tests can keep their own handle on a
/// fake and inspect it after the run.
#[derive(Clone)]
pub struct Toolchain {
    pub builder: Arc<dyn PackageBuilder>,
    pub signer: Arc<dyn Signer>,
    pub indexer: Arc<dyn Indexer>,
    pub transport: Arc<dyn Transport>,
}

impl Toolchain {
    /// Locates every tool on `PATH`.
    ///
    /// `mock` and `curl` are required. The signer and indexer are optional:
    /// when missing, an [`Unavailable`] stand-in takes their place.
    pub fn discover() -> error::Result<Self> {
        let builder = MockChroot::discover()?;
        let transport = Curl::discover()?;
        let signer: Arc<dyn Signer> = match RpmSign::discover() {
            Ok(signer) => Arc::new(signer),
            Err(_) => {
                tracing::debug!("rpmsign not found; packages cannot be signed");
                Arc::new(Unavailable("rpmsign"))
            },
        };
        let indexer: Arc<dyn Indexer> = match CreateRepo::discover() {
            Ok(indexer) => Arc::new(indexer),
            Err(_) => {
                tracing::warn!("createrepo not found; repository metadata cannot be regenerated");
                Arc::new(Unavailable("createrepo"))
            },
        };
        Ok(Self { builder: Arc::new(builder), signer, indexer, transport: Arc::new(transport) })
    }
}
