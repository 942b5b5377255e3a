//! `tablegen`: generate records, persistence models and a migration from a
//! schema document.

mod cli;
mod config;

use crate::{
    cli::Args,
    config::{ConfigError, ConfigFile, Overrides},
};
use clap::Parser;
use std::process::ExitCode;
use tablegen_build::{GenerateError, Generator, output::StaleFile};
use thiserror::Error as ThisError;
use tracing_subscriber::EnvFilter;

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("{} generated file(s) are stale; run tablegen to regenerate", .stale.len())]
    Stale { stale: Vec<StaleFile> },
}

impl CliError {
    // one line per problem, without the log prefix
    fn lines(&self) -> Vec<String> {
        match self {
            Self::Generate(err) => err.diagnostics(),
            Self::Stale { stale } => stale
                .iter()
                .map(ToString::to_string)
                .chain(std::iter::once(self.to_string()))
                .collect(),
            Self::Config(_) => vec![self.to_string()],
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.lines() {
                eprintln!("error: {line}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = ConfigFile::load(args.config.as_deref())?.resolve(Overrides {
        schema: args.schema.clone(),
        out_dir: args.out_dir.clone(),
    })?;
    let generator = Generator::new(config);

    if args.check {
        let report = generator.check()?;
        if !report.is_fresh() {
            return Err(CliError::Stale {
                stale: report.stale,
            });
        }
        tracing::info!("generated files are up to date");
    } else {
        generator.run()?;
    }

    Ok(())
}
