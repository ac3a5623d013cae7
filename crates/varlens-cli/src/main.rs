//! VarLens CLI - Value at Risk from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Historical VaR at 99% from a file of daily returns
//! varlens var --method historical --confidence 0.99 --input returns.csv
//!
//! # Parametric 10-day VaR from explicit moments
//! varlens var --method parametric --mean 0 --volatility 0.02 --horizon 10
//!
//! # Monte Carlo from a price history, reproducible, with a currency loss
//! varlens var --method montecarlo --input prices.csv --prices --seed 42 --portfolio-value 1000000
//!
//! # Every method at 95% and 99%
//! varlens report --input returns.csv --format json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so it never mixes with formatted output
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Var(args) => commands::var::execute(args, format)?,
        Commands::Report(args) => commands::report::execute(args, format)?,
    }

    Ok(())
}
