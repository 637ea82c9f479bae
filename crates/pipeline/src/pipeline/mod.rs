mod binary;
#[cfg(test)]
mod harness;
mod source;

use crate::error::{ErrorKind, Result};
use crate::{Context, Phase, Report};
use exn::ResultExt;
use ghostyum_repo::{ArtifactPattern, Registry};
use ghostyum_tools::Toolchain;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Drives both build phases for one [`Context`] with one [`Toolchain`].
pub struct Pipeline {
    ctx: Context,
    tools: Toolchain,
}

impl Pipeline {
    pub fn new(ctx: Context, tools: Toolchain) -> Self {
        Self { ctx, tools }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Runs the source phase and then, unless `source_only`, the binary
    /// phase on whichever source package the first phase settled on.
    #[tracing::instrument(level = "info", skip(self), fields(version = %self.ctx.version, dist = %self.ctx.dist))]
    pub fn run(&self, source_only: bool) -> Result<Report> {
        let arch = (!source_only).then_some(self.ctx.arch.as_str());
        self.ctx.layout.ensure(arch).or_raise(|| ErrorKind::Layout)?;

        let source = self.build_source()?;
        let binary = match source_only {
            true => None,
            false => Some(self.build_binary(source.name())?),
        };
        Ok(Report { source, binary })
    }

    /// Fresh private result directory for one builder invocation.
    ///
    /// It lives inside the repository root so that publishing is a rename on
    /// the same filesystem, and is removed when dropped.
    fn workspace(&self) -> Result<TempDir> {
        let root = self.ctx.layout.root();
        std::fs::create_dir_all(root).or_raise(|| ErrorKind::Workspace)?;
        tempfile::Builder::new().prefix(".build-").tempdir_in(root).or_raise(|| ErrorKind::Workspace)
    }

    /// Paths of the produced files in `result_dir` that match `pattern`.
    fn collect(&self, phase: Phase, result_dir: &Path, pattern: &ArtifactPattern) -> Result<Vec<PathBuf>> {
        let registry = Registry::new(result_dir);
        let names = registry.list().or_raise(|| ErrorKind::NoArtifacts(phase))?;
        let artifacts: Vec<PathBuf> =
            names.iter().filter(|name| pattern.matches(name)).map(|name| registry.path_of(name)).collect();
        if artifacts.is_empty() {
            tracing::debug!(%pattern, produced = ?names, "Nothing matched in result directory");
            exn::bail!(ErrorKind::NoArtifacts(phase));
        }
        Ok(artifacts)
    }

    /// Signs each artifact in place. Never fails the run: an artifact that
    /// could not be signed is published unsigned.
    fn sign(&self, artifacts: &[PathBuf]) {
        let Some(key) = self.ctx.sign_key.as_deref() else {
            tracing::info!("No signing key configured, publishing unsigned");
            return;
        };
        for artifact in artifacts {
            match self.tools.signer.sign(key, artifact) {
                Ok(()) => tracing::info!(artifact = %artifact.display(), "Signed"),
                Err(err) => tracing::error!(
                    artifact = %artifact.display(),
                    error = %*err,
                    "Signing failed, publishing unsigned"
                ),
            }
        }
    }

    fn publish(&self, registry: &Registry, artifacts: &[PathBuf]) -> Result<Vec<String>> {
        artifacts
            .iter()
            .map(|artifact| registry.publish(artifact).or_raise(|| ErrorKind::Publish(artifact.clone())))
            .collect()
    }

    /// Regenerates metadata for `dir`. A failure leaves the published
    /// packages reachable by path and is only logged.
    fn index(&self, dir: &Path) {
        match self.tools.indexer.index(dir) {
            Ok(()) => tracing::debug!(dir = %dir.display(), "Repository metadata regenerated"),
            Err(err) => tracing::error!(
                dir = %dir.display(),
                error = %*err,
                "Repository metadata regeneration failed, index is stale"
            ),
        }
    }
}
