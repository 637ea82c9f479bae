use crate::error::Result;
use crate::process::{self, args};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Parameters for building a source package from a spec file and sources.
#[derive(Debug, Clone)]
pub struct SourceBuild<'a> {
    pub profile: &'a str,
    /// `(macro, value)` pairs handed to rpmbuild as `--define "macro value"`.
    pub defines: &'a [(String, String)],
    pub spec: &'a Path,
    pub sources: &'a Path,
    /// Private directory the builder writes its artifacts and logs into.
    pub result_dir: &'a Path,
}

/// Parameters for rebuilding a source package into binary packages.
#[derive(Debug, Clone)]
pub struct BinaryBuild<'a> {
    pub profile: &'a str,
    pub defines: &'a [(String, String)],
    pub source_package: &'a Path,
    pub arch: &'a str,
    pub result_dir: &'a Path,
}

/// An isolated package builder.
///
/// Implementations block until the build finishes. Any failure is reported
/// as an error; the artifacts (if any) are left in `result_dir`.
pub trait PackageBuilder: Send + Sync {
    fn build_source(&self, request: &SourceBuild<'_>) -> Result<()>;
    fn build_binary(&self, request: &BinaryBuild<'_>) -> Result<()>;
}

/// [`PackageBuilder`] backed by the `mock` chroot builder.
#[derive(Debug, Clone)]
pub struct MockChroot {
    path: PathBuf,
}

impl MockChroot {
    const TOOL: &'static str = "mock";

    pub fn discover() -> Result<Self> {
        Ok(Self { path: process::discover(Self::TOOL, &["mock"])? })
    }

    fn common_args(profile: &str, result_dir: &Path, defines: &[(String, String)]) -> Vec<OsString> {
        let mut args = args!["-r", profile, "--resultdir", result_dir];
        for (name, value) in defines {
            args.extend(args!["--define", format!("{name} {value}")]);
        }
        args
    }

    fn source_args(request: &SourceBuild<'_>) -> Vec<OsString> {
        let mut args = Self::common_args(request.profile, request.result_dir, request.defines);
        args.extend(args!["--buildsrpm", "--spec", request.spec, "--sources", request.sources]);
        args
    }

    fn binary_args(request: &BinaryBuild<'_>) -> Vec<OsString> {
        let mut args = Self::common_args(request.profile, request.result_dir, request.defines);
        args.extend(args!["--arch", request.arch, "--rebuild", request.source_package]);
        args
    }
}

impl PackageBuilder for MockChroot {
    fn build_source(&self, request: &SourceBuild<'_>) -> Result<()> {
        process::run(Self::TOOL, &self.path, &Self::source_args(request))?;
        Ok(())
    }

    fn build_binary(&self, request: &BinaryBuild<'_>) -> Result<()> {
        process::run(Self::TOOL, &self.path, &Self::binary_args(request))?;
        Ok(())
    }
}
