use super::Pipeline;
use crate::error::{ErrorKind, Result};
use crate::{BinaryOutcome, Phase};
use exn::ResultExt;
use ghostyum_meta::naming::arch_suffix;
use ghostyum_repo::{ArtifactPattern, Registry};
use ghostyum_tools::BinaryBuild;

impl Pipeline {
    /// Ensures binary packages for the context's architecture are in the arch
    /// subtree, rebuilding `source_name` from `SRPMS` when they are not.
    #[tracing::instrument(level = "info", skip(self), fields(version = %self.ctx.version, arch = %self.ctx.arch))]
    pub fn build_binary(&self, source_name: &str) -> Result<BinaryOutcome> {
        let ctx = &self.ctx;
        let arch_dir = ctx.layout.arch_dir(&ctx.arch).or_raise(|| ErrorKind::Layout)?;
        let registry = Registry::new(arch_dir);
        let pattern = ctx.binary_pattern();
        if let Some(existing) = registry.find(&pattern).or_raise(|| ErrorKind::Registry)? {
            tracing::info!(package = %existing, "Binary package already built, skipping");
            return Ok(BinaryOutcome::AlreadyBuilt(existing));
        }
        tracing::debug!(%pattern, "No existing binary package");

        let source_package = Registry::new(ctx.layout.source_dir()).path_of(source_name);
        if !source_package.is_file() {
            exn::bail!(ErrorKind::MissingSourcePackage(source_package));
        }

        ctx.layout.ensure(Some(&ctx.arch)).or_raise(|| ErrorKind::Layout)?;
        let workspace = self.workspace()?;
        let defines = ctx.defines();
        let request = BinaryBuild {
            profile: &ctx.profile,
            defines: &defines,
            source_package: &source_package,
            arch: &ctx.arch,
            result_dir: workspace.path(),
        };
        tracing::info!(profile = %ctx.profile, source = %source_name, "Building binary package");
        self.tools.builder.build_binary(&request).or_raise(|| ErrorKind::Build(Phase::Binary))?;

        // The result directory also holds logs and a copy of the source
        // package; only packages for the target architecture are kept.
        let produced = ArtifactPattern::wildcard("", arch_suffix(&ctx.arch));
        let artifacts = self.collect(Phase::Binary, workspace.path(), &produced)?;
        self.sign(&artifacts);
        let published = self.publish(&registry, &artifacts)?;
        self.index(registry.dir());
        tracing::info!(packages = %published.join(", "), "Binary packages published");
        Ok(BinaryOutcome::Built(published))
    }
}
