//! The idempotent two-phase build.
//!
//! A run first makes sure a source package for the requested version exists
//! in the repository, then makes sure a binary package built from it exists
//! for the target architecture. Each phase follows the same steps:
//!
//! 1. skip if the repository already holds a matching artifact,
//! 2. check its inputs,
//! 3. stage the upstream archive (source phase only),
//! 4. run the isolated builder into a private result directory,
//! 5. sign what it produced (failures logged, never fatal),
//! 6. move the packages into the repository,
//! 7. regenerate repository metadata (failures logged, never fatal).
//!
//! Any other failure aborts the run; nothing is retried. Re-running after a
//! failure is cheap because completed phases are skipped.

mod context;
pub mod error;
mod outcome;
mod pipeline;

pub use crate::context::{Context, Granularity, VERSION_MACRO};
pub use crate::outcome::{BinaryOutcome, Phase, Report, SourceOutcome};
pub use crate::pipeline::Pipeline;
