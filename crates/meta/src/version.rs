use crate::consts::{VERSION_EXACT_REGEX, VERSION_SEARCH_REGEX};
use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// An upstream release identifier of the form `MAJOR.MINOR.PATCH`.
///
/// The textual form is kept verbatim (no normalization of leading zeroes)
/// because it ends up in archive URLs, package file names and repository
/// paths, all of which must agree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Finds the first `MAJOR.MINOR.PATCH` run anywhere inside `text`, such as
    /// an upstream redirect target (`https://…/ghost-5.2.0.zip`).
    pub fn search(text: &str) -> Option<Self> {
        VERSION_SEARCH_REGEX.find(text).map(|m| Self(m.as_str().to_string()))
    }
}

impl FromStr for ReleaseVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !VERSION_EXACT_REGEX.is_match(s) {
            exn::bail!(ErrorKind::InvalidVersion(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ReleaseVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5.2.0")]
    #[case("0.0.0")]
    #[case("1.25.13")]
    #[case("2023.10.100")]
    fn test_accepts_three_components(#[case] input: &str) {
        let version: ReleaseVersion = input.parse().unwrap();
        assert_eq!(version.as_str(), input);
        assert_eq!(version.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("5.2")]
    #[case("5.2.0.1")]
    #[case("v5.2.0")]
    #[case("5.2.0-beta")]
    #[case("5.x.0")]
    #[case(" 5.2.0")]
    #[case("5.2.0\n")]
    #[case("../5.2.0")]
    fn test_rejects_everything_else(#[case] input: &str) {
        let err = input.parse::<ReleaseVersion>().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidVersion(input.to_string()));
    }

    #[rstest]
    #[case("https://ghost.org/zip/ghost-5.2.0.zip", Some("5.2.0"))]
    #[case("https://github.com/TryGhost/Ghost/releases/download/v4.48.9/Ghost-4.48.9.zip", Some("4.48.9"))]
    #[case("https://ghost.org/zip/ghost-latest.zip", None)]
    #[case("", None)]
    fn test_search(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(ReleaseVersion::search(text).as_ref().map(ReleaseVersion::as_str), expected);
    }
}
