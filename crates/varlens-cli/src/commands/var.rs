//! Var command implementation.
//!
//! Estimates VaR with one method at one confidence level.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use varlens_risk::engine::VarEngine;
use varlens_risk::request::VarRequest;
use varlens_risk::var::{VarMethod, VarResult};

use crate::cli::{OutputFormat, SamplingArg};
use crate::commands::InputArgs;
use crate::output::{format_confidence, format_percent, print_csv, print_header, print_table, KeyValue};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Estimation method: historical, parametric or montecarlo
    #[arg(short, long, default_value = "historical")]
    pub method: VarMethod,

    /// Confidence level in (0, 1), e.g. 0.99
    #[arg(short, long, default_value = "0.95")]
    pub confidence: f64,

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

impl VarArgs {
    /// The engine request these arguments describe.
    pub fn to_request(&self, returns: Vec<f64>) -> VarRequest {
        let mut request = VarRequest::historical(returns, self.confidence)
            .with_method(self.method)
            .with_horizon(self.horizon)
            .with_sampling(self.sampling.into());
        request.lookback_days = self.lookback;
        request.mean = self.mean;
        request.volatility = self.volatility;
        request.simulation_count = self.simulations;
        request.seed = self.seed;
        request
    }
}

/// Flat result record.
#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct VarRow {
    #[tabled(rename = "Method")]
    method: VarMethod,
    #[tabled(rename = "Confidence")]
    confidence: f64,
    #[tabled(rename = "Horizon (days)")]
    horizon_days: i64,
    #[tabled(rename = "Observations")]
    observations: usize,
    #[tabled(rename = "VaR")]
    value: f64,
    #[tabled(rename = "Loss", display_with = "display_amount")]
    loss_amount: Option<Decimal>,
}

fn display_amount(amount: &Option<Decimal>) -> String {
    amount.map_or_else(String::new, |a| a.to_string())
}

/// Execute the var command.
pub fn execute(args: VarArgs, format: OutputFormat) -> Result<()> {
    let returns = args.input.load()?;
    let observations = returns.len();
    let request = args.to_request(returns);

    let result: VarResult = VarEngine::default().evaluate(request)?;
    let loss_amount = args.portfolio_value.map(|pv| result.loss_amount(pv));

    let row = VarRow {
        method: result.method,
        confidence: result.confidence,
        horizon_days: args.horizon,
        observations,
        value: result.value,
        loss_amount,
    };

    match format {
        OutputFormat::Table => {
            let mut pairs = vec![
                KeyValue::new("Method", row.method.to_string()),
                KeyValue::new("Confidence", format_confidence(row.confidence)),
                KeyValue::new("Horizon", format!("{} day(s)", row.horizon_days)),
                KeyValue::new("Observations", row.observations.to_string()),
                KeyValue::new("VaR", format_percent(row.value)),
            ];
            if let Some(amount) = row.loss_amount {
                pairs.push(KeyValue::new("Loss", amount.to_string()));
            }
            print_header("Value at Risk");
            print_table(&pairs)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        OutputFormat::Csv => {
            print_csv(std::slice::from_ref(&row))?;
        }
        OutputFormat::Minimal => match row.loss_amount {
            Some(amount) => println!("{:.6} {}", row.value, amount),
            None => println!("{:.6}", row.value),
        },
    }

    Ok(())
}
