//! A scratch install directory wired to recording fakes.

use crate::{Context, Granularity, Pipeline};
use ghostyum_repo::Layout;
use ghostyum_tools::Toolchain;
use ghostyum_tools::fakes::{FakeBuilder, FakeIndexer, FakeSigner, FakeTransport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) struct Harness {
    dir: TempDir,
    pub builder: Arc<FakeBuilder>,
    pub signer: Arc<FakeSigner>,
    pub indexer: Arc<FakeIndexer>,
    pub transport: Arc<FakeTransport>,
}

impl Harness {
    /// Upstream serves the archive; the spec file and sources directory exist.
    pub fn new(builder: FakeBuilder) -> Self {
        Self::with_transport(builder, FakeTransport::new().with_payload(b"PK\x03\x04".to_vec()))
    }

    pub fn with_transport(builder: FakeBuilder, transport: FakeTransport) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ghost.spec"), "Name: ghost\nRelease: 3%{?dist}\n").unwrap();
        std::fs::create_dir(dir.path().join("sources")).unwrap();
        Self {
            dir,
            builder: Arc::new(builder),
            signer: Arc::new(FakeSigner::new()),
            indexer: Arc::new(FakeIndexer::new()),
            transport: Arc::new(transport),
        }
    }

    pub fn signer(mut self, signer: FakeSigner) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    pub fn indexer(mut self, indexer: FakeIndexer) -> Self {
        self.indexer = Arc::new(indexer);
        self
    }

    pub fn repo(&self) -> PathBuf {
        self.dir.path().join("yum")
    }

    pub fn spec(&self) -> PathBuf {
        self.dir.path().join("ghost.spec")
    }

    pub fn sources(&self) -> PathBuf {
        self.dir.path().join("sources")
    }

    pub fn source_dir(&self) -> PathBuf {
        self.repo().join("5.2.0/el6/SRPMS")
    }

    pub fn arch_dir(&self) -> PathBuf {
        self.repo().join("5.2.0/el6/x86_64")
    }

    /// Places a file named `name` in `dir`, as a previous run would have.
    pub fn seed(&self, dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), name).unwrap();
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline_with(|_| {})
    }

    pub fn pipeline_with(&self, configure: impl FnOnce(&mut Context)) -> Pipeline {
        let mut ctx = Context {
            profile: "epel-6-x86_64".to_string(),
            dist: "el6".to_string(),
            arch: "x86_64".to_string(),
            version: "5.2.0".parse().unwrap(),
            package: "ghost".to_string(),
            spec: self.spec(),
            sources: self.sources(),
            layout: Layout::new(self.repo(), "5.2.0", "el6").unwrap(),
            granularity: Granularity::Version,
            sign_key: None,
            download_url: "https://ghost.org/zip/ghost-{version}.zip".to_string(),
        };
        configure(&mut ctx);
        let tools = Toolchain {
            builder: self.builder.clone(),
            signer: self.signer.clone(),
            indexer: self.indexer.clone(),
            transport: self.transport.clone(),
        };
        Pipeline::new(ctx, tools)
    }
}
