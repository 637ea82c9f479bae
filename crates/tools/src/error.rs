//! Tool Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Every external tool failure ends up as one of these,
//! whatever the tool; the caller decides whether that is fatal.

use derive_more::{Display, Error};

/// A tool error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for tool invocations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The executable is not installed (or not on `PATH`).
    #[display("{_0} not found on PATH")]
    NotFound(#[error(not(source))] &'static str),
    /// The executable exists but could not be started.
    #[display("unable to start {_0}")]
    Spawn(#[error(not(source))] &'static str),
    /// The tool ran and reported failure.
    #[display("{tool} failed ({status}): {message}")]
    Failed { tool: &'static str, status: String, message: String },
    /// The tool succeeded but its output was not what we asked for.
    #[display("{tool} returned unexpected output: {message}")]
    Output { tool: &'static str, message: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in the build pipeline retries; this only informs reporting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Spawn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotFound("mock").to_string(), "mock not found on PATH");
        assert_eq!(
            ErrorKind::Failed { tool: "mock", status: "exit status: 30".to_string(), message: "boom".to_string() }
                .to_string(),
            "mock failed (exit status: 30): boom"
        );
    }
}
