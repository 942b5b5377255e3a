use clap::{ArgAction, Parser};
use std::path::PathBuf;

///
/// Args
///

#[derive(Debug, Parser)]
#[command(
    name = "tablegen",
    version,
    about = "Generate records, persistence models and an idempotent SQL migration from a schema document"
)]
pub struct Args {
    /// Config file; defaults to ./tablegen.toml when it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Schema document to generate from.
    #[arg(long, value_name = "PATH", env = "TABLEGEN_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Directory the generated files are written to.
    #[arg(long, value_name = "DIR", env = "TABLEGEN_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Fail if the files on disk differ from a fresh generation; writes nothing.
    #[arg(long)]
    pub check: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log filter used when RUST_LOG is not set.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
