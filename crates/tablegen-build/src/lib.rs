//! Code generation for tablegen: schema document in, records, persistence
//! models and an idempotent SQL migration out.
//!
//! The pipeline is a straight line:
//! `Start -> Loaded -> Mapped -> Emitted -> Written`. Any failure stops it
//! and is reported as a [`GenerateError`] naming the stage that failed;
//! nothing is written unless every stage before `Written` succeeded.

pub mod helper;
pub mod migration;
pub mod model;
pub mod output;
pub mod paths;
pub mod plan;
pub mod record;

use crate::{
    output::{OutputError, OutputFile, StaleFile},
    paths::CratePaths,
    plan::SchemaPlan,
};
use derive_more::Display;
use std::path::{Path, PathBuf};
use tablegen_schema::{load_schema, node::Schema};
use thiserror::Error as ThisError;

pub const DEFAULT_SCHEMA_PATH: &str = "schemas/market_data.json";
pub const DEFAULT_OUT_DIR: &str = "generated";
pub const DEFAULT_RECORDS_FILE: &str = "records.rs";
pub const DEFAULT_MODELS_FILE: &str = "models.rs";
pub const DEFAULT_MIGRATION_FILE: &str = "migration.sql";

///
/// PipelineState
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum PipelineState {
    Start,
    Loaded,
    Mapped,
    Emitted,
    Written,
}

impl PipelineState {
    /// Stage that moves the pipeline out of this state.
    #[must_use]
    pub const fn next_stage(self) -> Option<Stage> {
        match self {
            Self::Start => Some(Stage::Load),
            Self::Loaded => Some(Stage::Map),
            Self::Mapped => Some(Stage::Emit),
            Self::Emitted => Some(Stage::Write),
            Self::Written => None,
        }
    }
}

///
/// Stage
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Stage {
    #[display("load")]
    Load,
    #[display("map")]
    Map,
    #[display("emit")]
    Emit,
    #[display("write")]
    Write,
}

///
/// GenerateError
///

#[derive(Debug, ThisError)]
#[error("{stage} failed: {source}")]
pub struct GenerateError {
    pub stage: Stage,
    #[source]
    pub source: GenerateErrorKind,
}

impl GenerateError {
    const fn new(stage: Stage, source: GenerateErrorKind) -> Self {
        Self { stage, source }
    }

    /// One diagnostic line per underlying problem.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        match &self.source {
            GenerateErrorKind::Schema(tablegen_schema::Error::Schema(errs)) => {
                errs.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

///
/// GenerateErrorKind
///

#[derive(Debug, ThisError)]
pub enum GenerateErrorKind {
    #[error(transparent)]
    Schema(#[from] tablegen_schema::Error),

    #[error("cannot render {artifact}: {source}")]
    Render {
        artifact: &'static str,
        #[source]
        source: syn::Error,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

///
/// GeneratorConfig
///

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub schema_path: PathBuf,
    pub out_dir: PathBuf,
    pub records_file: String,
    pub models_file: String,
    pub migration_file: String,
    pub paths: CratePaths,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(schema_path: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            records_file: DEFAULT_RECORDS_FILE.to_string(),
            models_file: DEFAULT_MODELS_FILE.to_string(),
            migration_file: DEFAULT_MIGRATION_FILE.to_string(),
            paths: CratePaths::default(),
        }
    }
}

///
/// Artifacts
/// The three generated files, in memory.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifacts {
    pub records: String,
    pub models: String,
    pub migration: String,
}

impl Artifacts {
    /// Render all three artifacts from an already loaded schema.
    pub fn from_schema(schema: &Schema, paths: &CratePaths) -> Result<Self, GenerateError> {
        let plan = SchemaPlan::new(schema);
        tracing::debug!(
            state = %PipelineState::Mapped,
            entities = plan.entities.len(),
            columns = plan.column_count(),
            "schema mapped"
        );

        let render = |artifact, tokens| {
            helper::render_rust(plan.version, tokens).map_err(|source| {
                GenerateError::new(Stage::Emit, GenerateErrorKind::Render { artifact, source })
            })
        };
        let artifacts = Self {
            records: render("records", record::generate(&plan, paths))?,
            models: render("models", model::generate(&plan, paths))?,
            migration: migration::generate(&plan),
        };
        tracing::debug!(state = %PipelineState::Emitted, "artifacts emitted");

        Ok(artifacts)
    }
}

///
/// Report
///

#[derive(Clone, Debug)]
pub struct Report {
    pub entities: usize,
    pub files: Vec<PathBuf>,
}

///
/// CheckReport
///

#[derive(Clone, Debug)]
pub struct CheckReport {
    pub stale: Vec<StaleFile>,
}

impl CheckReport {
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.stale.is_empty()
    }
}

///
/// Generator
///

#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load, map and emit without touching the output directory.
    pub fn generate(&self) -> Result<Artifacts, GenerateError> {
        self.load().and_then(|schema| self.emit(&schema))
    }

    /// Run the full pipeline and write all three artifacts.
    pub fn run(&self) -> Result<Report, GenerateError> {
        let schema = self.load()?;
        let artifacts = self.emit(&schema)?;

        let files = output::write_all(&self.config.out_dir, &self.files(&artifacts))
            .map_err(|err| GenerateError::new(Stage::Write, err.into()))?;
        for file in &files {
            tracing::info!(path = %file.display(), "wrote");
        }
        tracing::info!(
            state = %PipelineState::Written,
            entities = schema.entities.len(),
            files = files.len(),
            "generation complete"
        );

        Ok(Report {
            entities: schema.entities.len(),
            files,
        })
    }

    /// Regenerate in memory and compare with what is on disk.
    pub fn check(&self) -> Result<CheckReport, GenerateError> {
        let artifacts = self.generate()?;

        let stale = output::check_all(&self.config.out_dir, &self.files(&artifacts))
            .map_err(|err| GenerateError::new(Stage::Write, err.into()))?;
        for file in &stale {
            tracing::warn!(path = %file.path.display(), staleness = %file.staleness, "stale artifact");
        }

        Ok(CheckReport { stale })
    }

    /// Where each artifact lands.
    #[must_use]
    pub fn output_paths(&self) -> [PathBuf; 3] {
        let dir: &Path = &self.config.out_dir;

        [
            dir.join(&self.config.records_file),
            dir.join(&self.config.models_file),
            dir.join(&self.config.migration_file),
        ]
    }

    fn load(&self) -> Result<Schema, GenerateError> {
        tracing::debug!(state = %PipelineState::Start, path = %self.config.schema_path.display(), "loading schema");
        let schema = load_schema(&self.config.schema_path)
            .map_err(|err| GenerateError::new(Stage::Load, err.into()))?;
        tracing::debug!(state = %PipelineState::Loaded, "schema loaded");

        Ok(schema)
    }

    fn emit(&self, schema: &Schema) -> Result<Artifacts, GenerateError> {
        Artifacts::from_schema(schema, &self.config.paths)
    }

    fn files<'a>(&'a self, artifacts: &'a Artifacts) -> [OutputFile<'a>; 3] {
        [
            OutputFile {
                name: &self.config.records_file,
                contents: &artifacts.records,
            },
            OutputFile {
                name: &self.config.models_file,
                contents: &artifacts.models,
            },
            OutputFile {
                name: &self.config.migration_file,
                contents: &artifacts.migration,
            },
        ]
    }
}

///
/// TESTS
///
