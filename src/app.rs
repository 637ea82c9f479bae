//! Turns settings into a [`Context`] and runs the pipeline.

use crate::cli::Cli;
use crate::error::{self, ErrorKind, Result};
use exn::ResultExt;
use ghostyum_cache::{FileStore, SystemClock};
use ghostyum_config::Settings;
use ghostyum_meta::{ProfileInspector, ReleaseVersion, SpecInfo};
use ghostyum_pipeline::{Context, Granularity, Pipeline, Report};
use ghostyum_release::VersionResolver;
use ghostyum_repo::Layout;
use ghostyum_tools::Toolchain;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

/// What can be settled from local files alone, before any tool runs or
/// network request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Plan {
    pub requested: Option<ReleaseVersion>,
    pub dist: String,
    pub arch: String,
    pub granularity: Granularity,
}

/// Turns the outcome of a run into the process exit code.
///
/// A failure is written to `stderr` as a single `FATAL:` line naming every
/// layer of the error, followed by a hint when a re-run might succeed.
pub(crate) fn finish(result: Result<Report>, stderr: &mut impl Write) -> ExitCode {
    let err = match result {
        Ok(report) => {
            report.log();
            return ExitCode::SUCCESS;
        },
        Err(err) => err,
    };
    tracing::debug!("{err:?}");
    // Nothing useful remains to be done if stderr itself is gone.
    _ = writeln!(stderr, "FATAL: {}", error::report(&err));
    if err.is_retryable() {
        _ = writeln!(stderr, "The failure may be transient; running again may succeed.");
    }
    ExitCode::FAILURE
}

pub(crate) fn run(cli: &Cli) -> Result<Report> {
    let settings = ghostyum_config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let plan = plan(&settings)?;
    let tools = Toolchain::discover().or_raise(|| ErrorKind::Tools)?;
    execute(&settings, plan, tools)
}

pub(crate) fn plan(settings: &Settings) -> Result<Plan> {
    let requested = match settings.version.as_deref() {
        Some(version) => {
            Some(version.parse::<ReleaseVersion>().or_raise(|| ErrorKind::InvalidVersion(version.to_string()))?)
        },
        None => None,
    };

    let profiles = ProfileInspector::new(&settings.mock_config_dir);
    let dist = profiles.dist_of(&settings.root);
    if dist.is_empty() {
        exn::bail!(ErrorKind::MissingDist(settings.root.clone()));
    }
    let arch = match &settings.arch {
        Some(arch) => arch.clone(),
        None => profiles.default_arch_of(&settings.root),
    };
    if arch.is_empty() {
        exn::bail!(ErrorKind::MissingArch(settings.root.clone()));
    }

    let granularity = match settings.match_release {
        true => Granularity::Release(SpecInfo::read(settings.spec_path()).or_raise(|| ErrorKind::Spec)?.release),
        false => Granularity::Version,
    };
    tracing::debug!(profile = %settings.root, %dist, %arch, ?granularity, "Build plan");
    Ok(Plan { requested, dist, arch, granularity })
}

pub(crate) fn execute(settings: &Settings, plan: Plan, tools: Toolchain) -> Result<Report> {
    let version = match plan.requested {
        Some(version) => {
            tracing::info!(%version, "Using requested version");
            version
        },
        None => VersionResolver::new(
            Arc::new(FileStore::new(settings.cache_path())),
            Arc::new(SystemClock),
            tools.transport.clone(),
            &settings.latest_url,
            settings.cache_timeout,
        )
        .resolve()
        .or_raise(|| ErrorKind::Resolve)?,
    };

    let layout = Layout::new(settings.repo_dir(), version.as_str(), &plan.dist).or_raise(|| ErrorKind::Layout)?;
    let ctx = Context {
        profile: settings.root.clone(),
        dist: plan.dist,
        arch: plan.arch,
        version,
        package: settings.package.clone(),
        spec: settings.spec_path(),
        sources: settings.sources_dir(),
        layout,
        granularity: plan.granularity,
        sign_key: settings.sign_key.clone(),
        download_url: settings.download_url.clone(),
    };
    Pipeline::new(ctx, tools).run(settings.srpm_only).or_raise(|| ErrorKind::Build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostyum_pipeline::{BinaryOutcome, SourceOutcome};
    use ghostyum_tools::fakes::{FakeBuilder, FakeIndexer, FakeSigner, FakeTransport};
    use tempfile::TempDir;

    const PROFILE: &str = "config_opts['root'] = 'epel-6-x86_64'\n\
                           config_opts['target_arch'] = 'x86_64'\n\
                           config_opts['dist'] = 'el6'\n";

    /// An install directory with a spec file, a sources directory and a mock
    /// config directory holding one profile.
    fn install(profile: &str) -> (TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ghost.spec"), "Name: ghost\nRelease: 3%{?dist}\n").unwrap();
        std::fs::create_dir(dir.path().join("sources")).unwrap();
        std::fs::create_dir(dir.path().join("mock")).unwrap();
        std::fs::write(dir.path().join("mock/epel-6-x86_64.cfg"), profile).unwrap();
        let settings = Settings {
            base_dir: dir.path().to_path_buf(),
            mock_config_dir: dir.path().join("mock"),
            cache_dir: Some(dir.path().join("cache")),
            ..Settings::default()
        };
        (dir, settings)
    }

    fn tools(builder: FakeBuilder, transport: FakeTransport) -> (Arc<FakeBuilder>, Arc<FakeTransport>, Toolchain) {
        let builder = Arc::new(builder);
        let transport = Arc::new(transport);
        let tools = Toolchain {
            builder: builder.clone(),
            signer: Arc::new(FakeSigner::new()),
            indexer: Arc::new(FakeIndexer::new()),
            transport: transport.clone(),
        };
        (builder, transport, tools)
    }

    #[test]
    fn test_plan_from_profile() {
        let (_dir, settings) = install(PROFILE);
        let plan = plan(&settings).unwrap();
        assert_eq!(plan, Plan {
            requested: None,
            dist: "el6".to_string(),
            arch: "x86_64".to_string(),
            granularity: Granularity::Version,
        });
    }

    #[test]
    fn test_explicit_arch_wins() {
        let (_dir, settings) = install(PROFILE);
        let settings = Settings { arch: Some("i686".to_string()), ..settings };
        assert_eq!(plan(&settings).unwrap().arch, "i686");
    }

    #[test]
    fn test_invalid_version_fails_first() {
        // The profile is missing too; the version is checked before it.
        let (_dir, settings) = install("");
        let settings = Settings { version: Some("5.2".to_string()), ..settings };
        let err = plan(&settings).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidVersion(v) if v == "5.2"));
    }

    #[test]
    fn test_missing_dist_is_fatal() {
        let (_dir, settings) = install("config_opts['target_arch'] = 'x86_64'\n");
        assert!(matches!(&*plan(&settings).unwrap_err(), ErrorKind::MissingDist(_)));
    }

    #[test]
    fn test_unknown_profile_is_fatal() {
        let (_dir, settings) = install(PROFILE);
        let settings = Settings { root: "fedora-39-x86_64".to_string(), ..settings };
        assert!(matches!(&*plan(&settings).unwrap_err(), ErrorKind::MissingDist(p) if p == "fedora-39-x86_64"));
    }

    #[test]
    fn test_missing_arch_is_fatal() {
        let (_dir, settings) = install("config_opts['dist'] = 'el6'\n");
        assert!(matches!(&*plan(&settings).unwrap_err(), ErrorKind::MissingArch(_)));
    }

    #[test]
    fn test_match_release_reads_spec() {
        let (_dir, settings) = install(PROFILE);
        let settings = Settings { match_release: true, ..settings };
        assert_eq!(plan(&settings).unwrap().granularity, Granularity::Release("3".to_string()));
    }

    #[test]
    fn test_match_release_needs_release_field() {
        let (dir, settings) = install(PROFILE);
        std::fs::write(dir.path().join("ghost.spec"), "Name: ghost\n").unwrap();
        let settings = Settings { match_release: true, ..settings };
        assert!(matches!(&*plan(&settings).unwrap_err(), ErrorKind::Spec));
    }

    #[test]
    fn test_execute_resolves_latest_and_builds() {
        let (dir, settings) = install(PROFILE);
        let (builder, transport, tools) = tools(
            FakeBuilder::new()
                .with_source_outputs(["ghost-5.2.0-3.el6.src.rpm"])
                .with_binary_outputs(["ghost-5.2.0-3.el6.x86_64.rpm"]),
            FakeTransport::new().with_redirect("https://ghost.org/zip/ghost-5.2.0.zip").with_payload(b"PK".to_vec()),
        );
        let plan = plan(&settings).unwrap();
        let report = execute(&settings, plan, tools).unwrap();

        assert_eq!(report.source, SourceOutcome::Built("ghost-5.2.0-3.el6.src.rpm".to_string()));
        assert_eq!(report.binary, Some(BinaryOutcome::Built(vec!["ghost-5.2.0-3.el6.x86_64.rpm".to_string()])));
        assert_eq!(builder.calls().len(), 2);
        assert_eq!(transport.lookups().len(), 1);
        let cached = std::fs::read_to_string(dir.path().join("cache/latest-version")).unwrap();
        assert_eq!(cached.lines().nth(1), Some("5.2.0"));
        assert!(dir.path().join("yum/5.2.0/el6/x86_64/ghost-5.2.0-3.el6.x86_64.rpm").is_file());
    }

    #[test]
    fn test_execute_with_requested_version_skips_lookup() {
        let (_dir, settings) = install(PROFILE);
        let settings = Settings { version: Some("5.1.0".to_string()), srpm_only: true, ..settings };
        let (builder, transport, tools) = tools(
            FakeBuilder::new().with_source_outputs(["ghost-5.1.0-3.el6.src.rpm"]),
            FakeTransport::new().with_payload(b"PK".to_vec()),
        );
        let plan = plan(&settings).unwrap();
        let report = execute(&settings, plan, tools).unwrap();
        assert_eq!(report.binary, None);
        assert!(transport.lookups().is_empty());
        assert_eq!(transport.downloads(), ["https://ghost.org/zip/ghost-5.1.0.zip"]);
        assert_eq!(builder.calls().len(), 1);
    }

    #[test]
    fn test_execute_fails_when_upstream_unreachable() {
        let (dir, settings) = install(PROFILE);
        let (builder, _transport, tools) = tools(FakeBuilder::new(), FakeTransport::new());
        let plan = plan(&settings).unwrap();
        let err = execute(&settings, plan, tools).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Resolve));
        assert!(builder.calls().is_empty());
        assert!(!dir.path().join("yum").exists());
    }

    fn finish_to_string(result: Result<Report>) -> (ExitCode, String) {
        let mut stderr = Vec::new();
        let code = finish(result, &mut stderr);
        (code, String::from_utf8(stderr).unwrap())
    }

    #[test]
    fn test_finish_success_writes_nothing() {
        let source = SourceOutcome::AlreadyBuilt("ghost-5.2.0-3.el6.src.rpm".to_string());
        let report = Report { source, binary: None };
        let (code, stderr) = finish_to_string(Ok(report));
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_finish_reports_every_layer_of_a_failed_run() {
        let (dir, settings) = install(PROFILE);
        std::fs::remove_file(dir.path().join("ghost.spec")).unwrap();
        let settings = Settings { version: Some("5.2.0".to_string()), ..settings };
        let (_builder, _transport, tools) = tools(FakeBuilder::new(), FakeTransport::new());
        let plan = plan(&settings).unwrap();

        let (code, stderr) = finish_to_string(execute(&settings, plan, tools));
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
        let spec = dir.path().join("ghost.spec");
        assert_eq!(stderr, format!("FATAL: build failed: spec file is not a regular file: {}\n", spec.display()));
    }

    #[test]
    fn test_finish_hints_at_rerun_for_transient_failures() {
        let (_dir, settings) = install(PROFILE);
        let (_builder, _transport, tools) = tools(FakeBuilder::new(), FakeTransport::new());
        let plan = plan(&settings).unwrap();

        let (code, stderr) = finish_to_string(execute(&settings, plan, tools));
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
        let mut lines = stderr.lines();
        assert!(lines.next().unwrap().starts_with("FATAL: unable to determine the latest release: "));
        assert_eq!(lines.next(), Some("The failure may be transient; running again may succeed."));
    }

    #[test]
    fn test_finish_gives_no_hint_for_configuration_errors() {
        let (_dir, settings) = install("");
        let settings = Settings { version: Some("5.2".to_string()), ..settings };
        let err = plan(&settings).unwrap_err();
        let (code, stderr) = finish_to_string(Err(err));
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
        assert_eq!(stderr, "FATAL: invalid release version \"5.2\", expected MAJOR.MINOR.PATCH\n");
    }
}
