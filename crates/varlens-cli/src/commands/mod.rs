//! CLI command implementations.

pub mod report;
pub mod var;

pub use report::ReportArgs;
pub use var::VarArgs;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use varlens_risk::series::ReturnSeries;

use crate::error::{CliError, CliResult};

/// Where the return history comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// File with one number per line, or CSV whose last column is numeric
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Inline comma-separated values
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "input"
    )]
    pub returns: Vec<f64>,

    /// Treat the values as prices and convert them to returns
    #[arg(long)]
    pub prices: bool,
}

impl InputArgs {
    /// Loads the return series, empty when no input was given.
    pub fn load(&self) -> CliResult<Vec<f64>> {
        let values = match &self.input {
            Some(path) => read_numbers(path)?,
            None => self.returns.clone(),
        };

        if self.prices {
            tracing::debug!("converting {} prices to returns", values.len());
            Ok(ReturnSeries::from_prices(&values)?.into())
        } else {
            Ok(values)
        }
    }
}

/// Reads the numeric last column of a file.
pub fn read_numbers(path: &Path) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_numbers(file, path)
}

/// Parses one number per record from the last column. A first record that
/// does not parse is taken as a header; blank lines and `#` comments are skipped.
pub fn parse_numbers<R: Read>(reader: R, path: &Path) -> CliResult<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut values = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(field) = record.iter().next_back() else {
            continue;
        };
        if field.is_empty() {
            continue;
        }

        match field.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) if index == 0 => tracing::debug!("skipping header `{}`", field),
            Err(_) => {
                let line = record
                    .position()
                    .map_or(index + 1, |pos| usize::try_from(pos.line()).unwrap_or(usize::MAX));
                return Err(CliError::InvalidNumber {
                    path: path.to_path_buf(),
                    line,
                    value: field.to_string(),
                });
            }
        }
    }

    tracing::debug!("read {} values from {}", values.len(), path.display());
    Ok(values)
}
