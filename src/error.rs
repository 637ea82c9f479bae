//! Application Error Types
//!
//! Every variant is fatal: `main` prints it and exits with status 1.

use derive_more::{Display, Error};
use exn::Frame;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    #[display("invalid release version {_0:?}, expected MAJOR.MINOR.PATCH")]
    InvalidVersion(#[error(not(source))] String),
    #[display("mock profile {_0:?} declares no dist tag")]
    MissingDist(#[error(not(source))] String),
    #[display("mock profile {_0:?} declares no target_arch; pass --arch")]
    MissingArch(#[error(not(source))] String),
    #[display("unable to read release number from spec file")]
    Spec,
    #[display("required build tools are missing")]
    Tools,
    #[display("unable to determine the latest release")]
    Resolve,
    #[display("invalid repository layout")]
    Layout,
    #[display("build failed")]
    Build,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Resolve)
    }
}

/// One line naming every layer of `err`, outermost first:
/// `build failed: spec file is not a regular file: /srv/ghost.spec`.
///
/// Follows the first child at each level. A layer whose message already ends
/// with its child's message (an error that prints its own source) is not
/// repeated.
pub fn report(err: &Error) -> String {
    let mut messages: Vec<String> = Vec::new();
    let mut frame: Option<&Frame> = Some(err.frame());
    while let Some(current) = frame {
        let message = current.error().to_string();
        let repeated = messages.last().is_some_and(|last| last.ends_with(&message));
        if !message.is_empty() && !repeated {
            messages.push(message);
        }
        frame = current.children().first();
    }
    messages.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;

    #[derive(Debug, Display, Error)]
    #[display("mock failed (exit status: 30): error: Bad build req")]
    struct BuilderFailed;

    #[test]
    fn test_report_single_layer() {
        let err = Error::from(ErrorKind::InvalidVersion("5.2".to_string()));
        assert_eq!(report(&err), "invalid release version \"5.2\", expected MAJOR.MINOR.PATCH");
    }

    #[test]
    fn test_report_names_every_layer() {
        let err = exn::Exn::from(BuilderFailed).raise(ErrorKind::Build);
        assert_eq!(report(&err), "build failed: mock failed (exit status: 30): error: Bad build req");
    }

    #[test]
    fn test_report_includes_foreign_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml is gone");
        let err = Err::<(), _>(io).or_raise(|| ErrorKind::Config).unwrap_err();
        assert_eq!(report(&err), "unable to load configuration: config.toml is gone");
    }

    #[test]
    fn test_report_skips_repeated_source() {
        let wrapped = WrappedIo(std::io::Error::other("disk full"));
        let err = Err::<(), _>(wrapped).or_raise(|| ErrorKind::Layout).unwrap_err();
        assert_eq!(report(&err), "invalid repository layout: I/O error: disk full");
    }

    #[derive(Debug, Display, Error)]
    #[display("I/O error: {_0}")]
    struct WrappedIo(std::io::Error);
}
