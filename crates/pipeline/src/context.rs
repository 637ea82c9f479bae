use ghostyum_meta::ReleaseVersion;
use ghostyum_meta::naming::{SOURCE_ARCH, arch_suffix, binary_package_name, source_package_name, version_prefix};
use ghostyum_repo::{ArtifactPattern, Layout};
use std::path::PathBuf;

/// Macro through which the release version reaches the spec file.
pub const VERSION_MACRO: &str = "ghost_version";

/// How precisely an existing artifact must match before a phase is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Granularity {
    /// Any package of the same version counts, whatever its release counter
    /// and dist tag.
    Version,
    /// Only the exact name for this release counter counts, so bumping
    /// `Release:` in the spec file triggers a rebuild.
    Release(String),
}

/// Everything one run needs to know, fixed at startup.
#[derive(Debug, Clone)]
pub struct Context {
    /// mock build-root profile, e.g. `epel-6-x86_64`.
    pub profile: String,
    /// Dist tag declared by the profile, e.g. `el6`.
    pub dist: String,
    /// Target architecture of the binary phase.
    pub arch: String,
    pub version: ReleaseVersion,
    /// Package identity, the leading part of every package file name.
    pub package: String,
    pub spec: PathBuf,
    pub sources: PathBuf,
    pub layout: Layout,
    pub granularity: Granularity,
    /// GPG key name to sign with. Unset disables signing.
    pub sign_key: Option<String>,
    /// Upstream archive URL with a `{version}` placeholder.
    pub download_url: String,
}

impl Context {
    pub(crate) fn defines(&self) -> Vec<(String, String)> {
        vec![(VERSION_MACRO.to_string(), self.version.to_string())]
    }

    pub fn source_pattern(&self) -> ArtifactPattern {
        match &self.granularity {
            Granularity::Version => {
                ArtifactPattern::wildcard(version_prefix(&self.package, &self.version), arch_suffix(SOURCE_ARCH))
            },
            Granularity::Release(release) => ArtifactPattern::exact(self.source_name(release)),
        }
    }

    pub fn binary_pattern(&self) -> ArtifactPattern {
        match &self.granularity {
            Granularity::Version => {
                ArtifactPattern::wildcard(version_prefix(&self.package, &self.version), arch_suffix(&self.arch))
            },
            Granularity::Release(release) => {
                ArtifactPattern::exact(binary_package_name(&self.source_name(release), &self.arch))
            },
        }
    }

    fn source_name(&self, release: &str) -> String {
        source_package_name(&self.package, &self.version, release, &self.dist)
    }
}
