//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A record of the input file holds no number.
    #[error("{}:{line}: expected a number, found `{value}`", path.display())]
    InvalidNumber {
        /// Input file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Offending text.
        value: String,
    },

    /// IO error.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The engine rejected the input.
    #[error(transparent)]
    Risk(#[from] varlens_risk::RiskError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
