//! Layered configuration.
//!
//! Settings are assembled once at startup from, in increasing precedence:
//!
//! 1. built-in defaults,
//! 2. a TOML file (`--config`, else `config.toml` in the user's config dir),
//! 3. `GHOSTYUM_*` environment variables,
//! 4. command-line flags that were actually given.
//!
//! Path settings left unset are derived from `base_dir` by the accessors on
//! [`Settings`].

pub mod error;
mod loader;
mod settings;

pub use crate::loader::{ENV_PREFIX, default_config_file, load};
pub use crate::settings::{Overrides, Settings};
