use super::Pipeline;
use crate::error::{ErrorKind, Result};
use crate::{Phase, SourceOutcome};
use exn::{OptionExt, ResultExt};
use ghostyum_meta::naming::{SOURCE_ARCH, arch_suffix};
use ghostyum_release::SourceFetcher;
use ghostyum_repo::{ArtifactPattern, Registry, compare_names};
use ghostyum_tools::SourceBuild;

impl Pipeline {
    /// Ensures a source package for the context's version is in `SRPMS`.
    #[tracing::instrument(level = "info", skip(self), fields(version = %self.ctx.version))]
    pub fn build_source(&self) -> Result<SourceOutcome> {
        let ctx = &self.ctx;
        let registry = Registry::new(ctx.layout.source_dir());
        let pattern = ctx.source_pattern();
        if let Some(existing) = registry.find(&pattern).or_raise(|| ErrorKind::Registry)? {
            tracing::info!(package = %existing, "Source package already built, skipping");
            return Ok(SourceOutcome::AlreadyBuilt(existing));
        }
        tracing::debug!(%pattern, "No existing source package");

        if !ctx.spec.is_file() {
            exn::bail!(ErrorKind::MissingSpec(ctx.spec.clone()));
        }
        if !ctx.sources.is_dir() {
            exn::bail!(ErrorKind::MissingSources(ctx.sources.clone()));
        }
        SourceFetcher::new(self.tools.transport.clone(), &ctx.download_url)
            .ensure(&ctx.version, &ctx.sources)
            .or_raise(|| ErrorKind::Fetch)?;

        ctx.layout.ensure(None).or_raise(|| ErrorKind::Layout)?;
        let workspace = self.workspace()?;
        let defines = ctx.defines();
        let request = SourceBuild {
            profile: &ctx.profile,
            defines: &defines,
            spec: &ctx.spec,
            sources: &ctx.sources,
            result_dir: workspace.path(),
        };
        tracing::info!(profile = %ctx.profile, "Building source package");
        self.tools.builder.build_source(&request).or_raise(|| ErrorKind::Build(Phase::Source))?;

        let produced = ArtifactPattern::wildcard("", arch_suffix(SOURCE_ARCH));
        let artifacts = self.collect(Phase::Source, workspace.path(), &produced)?;
        self.sign(&artifacts);
        let published = self.publish(&registry, &artifacts)?;
        self.index(registry.dir());

        // mock produces exactly one source package; should there be more,
        // the newest name is the one the binary phase rebuilds.
        let name = published
            .into_iter()
            .max_by(|a, b| compare_names(a, b))
            .ok_or_raise(|| ErrorKind::NoArtifacts(Phase::Source))?;
        tracing::info!(package = %name, "Source package published");
        Ok(SourceOutcome::Built(name))
    }
}
