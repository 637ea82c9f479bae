use crate::consts::{DIGITS_REGEX, RELEASE_TAG_REGEX};
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::path::Path;
use tracing::instrument;

/// Facts read from an RPM spec file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecInfo {
    /// First run of digits in the `Release:` tag (`Release: 3%{?dist}` → `3`).
    pub release: String,
}

impl SpecInfo {
    /// Reads the spec file once and extracts the release counter.
    #[instrument(skip_all, fields(spec = %path.as_ref().display()))]
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).or_raise(|| ErrorKind::SpecUnreadable(path.to_path_buf()))?;
        let release = Self::release_of(&text).ok_or_raise(|| ErrorKind::MissingRelease(path.to_path_buf()))?;
        tracing::debug!(release = %release, "Read release counter from spec file");
        Ok(Self { release })
    }

    /// Only the first `Release:` tag counts; later ones usually belong to
    /// conditional blocks and are ignored.
    fn release_of(text: &str) -> Option<String> {
        let value = RELEASE_TAG_REGEX.captures(text)?.get(1)?.as_str();
        DIGITS_REGEX.find(value).map(|m| m.as_str().to_string())
    }
}
