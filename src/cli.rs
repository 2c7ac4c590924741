use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Config;

/// Verbosity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show errors
    Quiet,
    /// Warnings and the run summary
    #[default]
    Normal,
    /// Per-file outcomes
    Verbose,
}

impl VerbosityLevel {
    pub fn from_config(config: &Config) -> Self {
        if config.output.quiet {
            VerbosityLevel::Quiet
        } else if config.output.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Turn a directory of bibxml draft references into a gource custom log
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "id-log")]
#[command(about = "Generate a gource custom log from bibxml Internet-Draft references")]
#[command(version)]
pub struct Cli {
    /// Directory of bibxml reference files
    #[arg(help = "Directory of reference files [default: bibxml3]")]
    pub dir: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Seed for the synthetic time of day
    #[arg(long = "seed", help = "Seed the time-of-day generator for reproducible output")]
    pub seed: Option<u64>,

    /// Interpret publication dates in UTC instead of local time
    #[arg(long = "utc")]
    pub utc: bool,

    /// Print a run summary to stderr
    #[arg(long = "summary")]
    pub summary: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Log every file's outcome to stderr")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
