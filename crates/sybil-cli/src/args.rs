use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sybil")]
#[command(about = "Detect coordinated abuse in social/on-chain interaction logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an optional sybil.toml overlay; defaults to the OS config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit the full AnalysisResult as JSON instead of the terminal report.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a CSV or JSON event log and print a scorecard/cluster/wave report.
    Analyze(AnalyzeArgs),
    /// Configuration file management.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to the event log (.csv or .json).
    pub input: PathBuf,

    /// Only print actors whose sybilScore is at or above this value.
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Number of top scorecards to print (by sybilScore, descending).
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a starter sybil.toml with the default settings.
    Init {
        /// Overwrite the file if it already exists.
        #[arg(long)]
        force: bool,
    },
}
