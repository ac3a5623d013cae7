//! Report command implementation.
//!
//! Tabulates VaR for every method at several confidence levels.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use varlens_risk::confidence::Confidence;
use varlens_risk::engine::VarEngine;
use varlens_risk::report::{ReportRequest, ReportRow, VarReport};
use varlens_risk::var::{VarMethod, VarResult};

use crate::cli::{OutputFormat, SamplingArg};
use crate::commands::InputArgs;
use crate::output::{format_confidence, format_percent, print_csv, print_header, print_table, print_warning};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Confidence levels (repeat or comma-separate; defaults to 0.95,0.99)
    #[arg(short, long = "confidence", value_delimiter = ',')]
    pub confidences: Vec<f64>,

    /// Horizon in days
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub horizon: i64,

    /// Historical: number of most recent returns to use
    #[arg(long, allow_negative_numbers = true)]
    pub lookback: Option<i64>,

    /// One-period mean return (estimated from the input when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub mean: Option<f64>,

    /// One-period volatility (estimated from the input when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub volatility: Option<f64>,

    /// Monte Carlo: number of simulated paths
    #[arg(short, long, allow_negative_numbers = true)]
    pub simulations: Option<i64>,

    /// Monte Carlo: path distribution
    #[arg(long, value_enum, default_value = "normal")]
    pub sampling: SamplingArg,

    /// Monte Carlo: seed for a reproducible run
    #[arg(long, env = "VARLENS_SEED")]
    pub seed: Option<u64>,

    /// Position value; adds the loss in currency units
    #[arg(short, long)]
    pub portfolio_value: Option<Decimal>,

    #[command(flatten)]
    pub input: InputArgs,
}

impl ReportArgs {
    /// The engine report request these arguments describe.
    pub fn to_request(&self, returns: Vec<f64>) -> ReportRequest {
        ReportRequest {
            returns,
            confidences: self.confidences.clone(),
            horizon_days: Some(self.horizon),
            lookback_days: self.lookback,
            mean: self.mean,
            volatility: self.volatility,
            simulation_count: self.simulations,
            sampling: self.sampling.into(),
            seed: self.seed,
        }
    }
}

/// One report line.
#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct ReportLine {
    #[tabled(rename = "Method")]
    method: VarMethod,
    #[tabled(rename = "Confidence", display_with = "display_confidence")]
    confidence: f64,
    #[tabled(rename = "VaR", display_with = "display_value")]
    value: Option<f64>,
    #[tabled(rename = "Loss", display_with = "display_amount")]
    loss_amount: Option<Decimal>,
    #[tabled(rename = "Error", display_with = "display_error")]
    error: Option<String>,
}

fn display_confidence(level: &f64) -> String {
    format_confidence(*level)
}

fn display_value(value: &Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_percent)
}

fn display_amount(amount: &Option<Decimal>) -> String {
    amount.map_or_else(String::new, |a| a.to_string())
}

fn display_error(error: &Option<String>) -> String {
    error.clone().unwrap_or_default()
}

impl ReportLine {
    fn from_row(row: &ReportRow, portfolio_value: Option<Decimal>) -> Self {
        let loss_amount = match (row.value, portfolio_value, Confidence::new(row.confidence)) {
            (Some(value), Some(pv), Ok(confidence)) => {
                Some(VarResult::new(value, row.method, confidence).loss_amount(pv))
            }
            _ => None,
        };

        Self {
            method: row.method,
            confidence: row.confidence,
            value: row.value,
            loss_amount,
            error: row.error.clone(),
        }
    }
}

/// Execute the report command.
pub fn execute(args: ReportArgs, format: OutputFormat) -> Result<()> {
    let returns = args.input.load()?;
    let request = args.to_request(returns);
    request.validate()?;

    let report = VarReport::build(&VarEngine::default(), &request);
    let lines: Vec<ReportLine> = report
        .rows
        .iter()
        .map(|row| ReportLine::from_row(row, args.portfolio_value))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "VaR report: {} observations, {} day(s)",
                report.observations, report.horizon_days
            ));
            print_table(&lines)?;
            if let Some(seed) = report.seed {
                println!("Monte Carlo seed: {}", seed);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            print_csv(&lines)?;
        }
        OutputFormat::Minimal => {
            for line in &lines {
                match line.value {
                    Some(value) => println!("{} {} {:.6}", line.method, line.confidence, value),
                    None => println!("{} {} -", line.method, line.confidence),
                }
            }
        }
    }

    let failed = lines.iter().filter(|line| line.error.is_some()).count();
    if failed > 0 {
        print_warning(&format!("{} of {} rows could not be estimated", failed, lines.len()));
    }

    Ok(())
}
