//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use varlens_risk::request::Sampling;

use crate::commands::{ReportArgs, VarArgs};

/// VarLens - Value at Risk from historical returns
#[derive(Parser)]
#[command(name = "varlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate VaR with one method at one confidence level
    Var(VarArgs),

    /// Tabulate VaR for every method at several confidence levels
    Report(ReportArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Monte Carlo path distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SamplingArg {
    /// Normal returns with the given or estimated moments
    #[default]
    Normal,
    /// Returns resampled from the input history
    Bootstrap,
}

impl From<SamplingArg> for Sampling {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::Normal => Sampling::Normal,
            SamplingArg::Bootstrap => Sampling::Bootstrap,
        }
    }
}
