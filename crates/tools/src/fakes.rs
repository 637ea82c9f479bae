//! Recording fakes for every tool trait.
//!
//! Each fake remembers how it was called and can be told to fail, so the
//! failure policy of a caller can be exercised without any of the real tools
//! installed.

use crate::error::{ErrorKind, Result};
use crate::{BinaryBuild, Indexer, PackageBuilder, Signer, SourceBuild, Transport};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn failure(tool: &'static str) -> crate::error::Error {
    exn::Exn::from(ErrorKind::Failed { tool, status: "exit status: 1".to_string(), message: "simulated".to_string() })
}

/// One recorded [`FakeBuilder`] invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCall {
    Source { profile: String, defines: Vec<(String, String)>, spec: PathBuf, sources: PathBuf },
    Binary { profile: String, defines: Vec<(String, String)>, source_package: PathBuf, arch: String },
}

/// [`PackageBuilder`] that writes named placeholder files into the result
/// directory instead of building anything. A `build.log` is always written
/// alongside, the way mock leaves its logs next to the packages.
///
/// ```
/// use ghostyum_tools::fakes::FakeBuilder;
///
/// let builder = FakeBuilder::new()
///     .with_source_outputs(["ghost-5.2.0-3.el6.src.rpm"])
///     .with_binary_outputs(["ghost-5.2.0-3.el6.x86_64.rpm"]);
/// assert!(builder.calls().is_empty());
/// ```
#[derive(Default)]
pub struct FakeBuilder {
    source_outputs: Vec<String>,
    binary_outputs: Vec<String>,
    fail: bool,
    calls: Mutex<Vec<BuildCall>>,
}

impl FakeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_outputs(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.source_outputs = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_binary_outputs(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.binary_outputs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Every build exits non-zero after recording the call, leaving a log
    /// but no packages behind.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<BuildCall> {
        lock(&self.calls).clone()
    }

    fn produce(&self, result_dir: &Path, names: &[String]) -> Result<()> {
        let write = |name: &str, contents: &str| {
            std::fs::write(result_dir.join(name), contents).map_err(|_| failure("mock"))
        };
        write("build.log", "fake build\n")?;
        if self.fail {
            return Err(failure("mock"));
        }
        for name in names {
            write(name, name)?;
        }
        Ok(())
    }
}

impl PackageBuilder for FakeBuilder {
    fn build_source(&self, request: &SourceBuild<'_>) -> Result<()> {
        lock(&self.calls).push(BuildCall::Source {
            profile: request.profile.to_string(),
            defines: request.defines.to_vec(),
            spec: request.spec.to_path_buf(),
            sources: request.sources.to_path_buf(),
        });
        self.produce(request.result_dir, &self.source_outputs)
    }

    fn build_binary(&self, request: &BinaryBuild<'_>) -> Result<()> {
        lock(&self.calls).push(BuildCall::Binary {
            profile: request.profile.to_string(),
            defines: request.defines.to_vec(),
            source_package: request.source_package.to_path_buf(),
            arch: request.arch.to_string(),
        });
        // mock --rebuild also drops a copy of the source package it rebuilt.
        let mut outputs = self.binary_outputs.clone();
        if let Some(name) = request.source_package.file_name() {
            outputs.push(name.to_string_lossy().into_owned());
        }
        self.produce(request.result_dir, &outputs)
    }
}

/// [`Signer`] that records `(key, artifact)` pairs.
#[derive(Default)]
pub struct FakeSigner {
    fail: bool,
    signed: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Every attempted signature, including failed ones.
    pub fn signed(&self) -> Vec<(String, PathBuf)> {
        lock(&self.signed).clone()
    }
}

impl Signer for FakeSigner {
    fn sign(&self, key: &str, artifact: &Path) -> Result<()> {
        lock(&self.signed).push((key.to_string(), artifact.to_path_buf()));
        match self.fail {
            true => Err(failure("rpmsign")),
            false => Ok(()),
        }
    }
}

/// [`Indexer`] that records which directories were indexed.
#[derive(Default)]
pub struct FakeIndexer {
    fail: bool,
    indexed: Mutex<Vec<PathBuf>>,
}

impl FakeIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn indexed(&self) -> Vec<PathBuf> {
        lock(&self.indexed).clone()
    }
}

impl Indexer for FakeIndexer {
    fn index(&self, dir: &Path) -> Result<()> {
        lock(&self.indexed).push(dir.to_path_buf());
        match self.fail {
            true => Err(failure("createrepo")),
            false => Ok(()),
        }
    }
}

/// [`Transport`] serving one canned redirect target and one canned payload.
#[derive(Default)]
pub struct FakeTransport {
    redirect: Option<String>,
    payload: Option<Vec<u8>>,
    lookups: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without a redirect target every lookup fails.
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Without a payload every download fails.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// URLs passed to [`redirect_target`](Transport::redirect_target).
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }

    /// URLs passed to [`download`](Transport::download).
    pub fn downloads(&self) -> Vec<String> {
        lock(&self.downloads).clone()
    }
}

impl Transport for FakeTransport {
    fn redirect_target(&self, url: &str) -> Result<String> {
        lock(&self.lookups).push(url.to_string());
        self.redirect.clone().ok_or_else(|| failure("curl"))
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        lock(&self.downloads).push(url.to_string());
        let payload = self.payload.as_ref().ok_or_else(|| failure("curl"))?;
        std::fs::write(dest, payload).map_err(|_| failure("curl"))
    }
}
