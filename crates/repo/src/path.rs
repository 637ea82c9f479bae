//! Path segment validation.
//!
//! Versions, dist tags and architectures become directory names inside the
//! repository. Each must be exactly one normal path component so that no
//! combination of them can point outside the repository root.

use crate::error::{ErrorKind, Result};
use std::path::{Component, Path};

/// Accepts `value` only if it is a single, normal path component.
///
/// ```
/// use ghostyum_repo::validate_segment;
/// assert!(validate_segment("5.2.0").is_ok());
/// assert!(validate_segment("x86_64").is_ok());
/// assert!(validate_segment("..").is_err());
/// assert!(validate_segment("el6/../..").is_err());
/// ```
pub fn validate(value: &str) -> Result<&str> {
    // Null bytes pass through Path::components() on Unix but truncate
    // C-based syscalls; backslashes are separators on Windows.
    if value.contains(['\0', '\\', '/']) {
        exn::bail!(ErrorKind::InvalidSegment(value.to_string()));
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(value),
        _ => exn::bail!(ErrorKind::InvalidSegment(value.to_string())),
    }
}
