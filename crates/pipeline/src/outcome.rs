use derive_more::Display;

/// The two build phases, in the order they run.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[display("source")]
    Source,
    #[display("binary")]
    Binary,
}

/// Result of the source phase. Either way the name is that of a source
/// package present in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Built(String),
    AlreadyBuilt(String),
}

impl SourceOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Built(name) | Self::AlreadyBuilt(name) => name,
        }
    }
}

/// Result of the binary phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOutcome {
    /// Every package the build produced, as published.
    Built(Vec<String>),
    /// The existing package that satisfied the existence check.
    AlreadyBuilt(String),
}

/// What a run did, phase by phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: SourceOutcome,
    /// `None` when the binary phase was not requested.
    pub binary: Option<BinaryOutcome>,
}

impl Report {
    /// Logs one line per phase.
    pub fn log(&self) {
        match &self.source {
            SourceOutcome::Built(name) => tracing::info!(package = %name, "Source package built"),
            SourceOutcome::AlreadyBuilt(name) => tracing::info!(package = %name, "Source package already present"),
        }
        match &self.binary {
            Some(BinaryOutcome::Built(names)) => {
                tracing::info!(packages = %names.join(", "), "Binary packages built")
            },
            Some(BinaryOutcome::AlreadyBuilt(name)) => {
                tracing::info!(package = %name, "Binary package already present")
            },
            None => tracing::info!("Binary phase skipped (source only)"),
        }
    }
}
