//! Multi-method VaR report.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::engine::VarEngine;
use crate::error::{ErrorKind, RiskError, RiskResult};
use crate::request::{Sampling, VarRequest};
use crate::var::{VarMethod, VarResult};

/// Confidence levels tabulated when a report request names none.
pub const DEFAULT_REPORT_CONFIDENCES: [f64; 2] = [0.95, 0.99];

/// Most confidence levels a single report may tabulate.
pub const MAX_REPORT_CONFIDENCES: usize = 16;

/// Inputs shared by every row of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// One-period returns, oldest first.
    #[serde(default)]
    pub returns: Vec<f64>,

    /// Confidence levels (defaults to 95% and 99%).
    #[serde(default)]
    pub confidences: Vec<f64>,

    /// Horizon in days.
    #[serde(default)]
    pub horizon_days: Option<i64>,

    /// Historical lookback in days.
    #[serde(default)]
    pub lookback_days: Option<i64>,

    /// Explicit one-period mean.
    #[serde(default)]
    pub mean: Option<f64>,

    /// Explicit one-period volatility.
    #[serde(default)]
    pub volatility: Option<f64>,

    /// Monte Carlo path count.
    #[serde(default)]
    pub simulation_count: Option<i64>,

    /// Monte Carlo path distribution.
    #[serde(default)]
    pub sampling: Sampling,

    /// Monte Carlo seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ReportRequest {
    /// Report over `returns` at the default confidence levels.
    #[must_use]
    pub fn new(returns: Vec<f64>) -> Self {
        Self {
            returns,
            ..Self::default()
        }
    }

    /// The request evaluated for each row, before method and confidence are set.
    #[must_use]
    pub fn template(&self) -> VarRequest {
        let mut request = VarRequest::historical(self.returns.clone(), 0.0)
            .with_sampling(self.sampling);
        if let Some(days) = self.horizon_days {
            request = request.with_horizon(days);
        }
        request.lookback_days = self.lookback_days;
        request.mean = self.mean;
        request.volatility = self.volatility;
        request.simulation_count = self.simulation_count;
        request.seed = self.seed;
        request
    }

    /// Requested confidence levels, or the defaults.
    #[must_use]
    pub fn confidence_levels(&self) -> Vec<f64> {
        if self.confidences.is_empty() {
            DEFAULT_REPORT_CONFIDENCES.to_vec()
        } else {
            self.confidences.clone()
        }
    }

    /// Rejects a report with more than [`MAX_REPORT_CONFIDENCES`] levels.
    /// Individual levels are checked per row.
    pub fn validate(&self) -> RiskResult<()> {
        if self.confidences.len() > MAX_REPORT_CONFIDENCES {
            return Err(RiskError::invalid_parameter(
                "confidences",
                format!(
                    "at most {MAX_REPORT_CONFIDENCES} levels per report, got {}",
                    self.confidences.len()
                ),
            ));
        }
        Ok(())
    }
}

/// One method at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Estimation method.
    pub method: VarMethod,
    /// Confidence level as requested.
    pub confidence: f64,
    /// VaR as a fraction of portfolio value, when the evaluation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Failure class, when the evaluation was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Failure message, when the evaluation was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// VaR for every method at a set of confidence levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarReport {
    /// Returns supplied.
    pub observations: usize,
    /// Horizon in days as requested.
    pub horizon_days: i64,
    /// Seed shared by the Monte Carlo rows.
    pub seed: Option<u64>,
    /// Rows grouped by method, then by confidence in request order.
    pub rows: Vec<ReportRow>,
}

impl VarReport {
    /// Evaluates every method at every confidence level of `request`.
    ///
    /// A failing row records its error and the remaining rows are still
    /// evaluated. All Monte Carlo rows draw the same paths, so their values
    /// are ordered the same way as the confidence levels.
    pub fn build(engine: &VarEngine, request: &ReportRequest) -> Self {
        let template = Self::seeded_template(engine, request);
        let rows = Self::row_requests(&template, request)
            .map(|(method, confidence, row_request)| {
                Self::row(method, confidence, engine.evaluate(row_request))
            })
            .collect();
        Self::assemble(&template, rows)
    }

    /// Like [`build`](Self::build), but stops with [`RiskError::Cancelled`]
    /// once `token` is cancelled, abandoning any Monte Carlo row in flight.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InvalidParameter`] for too many confidence levels
    /// * [`RiskError::Cancelled`] when `token` is cancelled
    pub fn build_cancellable(
        engine: &VarEngine,
        request: &ReportRequest,
        token: &CancellationToken,
    ) -> RiskResult<Self> {
        request.validate()?;
        let template = Self::seeded_template(engine, request);

        let mut rows = Vec::new();
        for (method, confidence, row_request) in Self::row_requests(&template, request) {
            token.check()?;
            let outcome = engine.evaluate_cancellable(row_request, token.clone());
            if matches!(outcome, Err(RiskError::Cancelled)) {
                debug!("VaR report cancelled after {} rows", rows.len());
                return Err(RiskError::Cancelled);
            }
            rows.push(Self::row(method, confidence, outcome));
        }
        Ok(Self::assemble(&template, rows))
    }

    fn seeded_template(engine: &VarEngine, request: &ReportRequest) -> VarRequest {
        let mut template = request.template();
        if template.seed.is_none() {
            template.seed = Some(engine.config().seed.unwrap_or_else(rand::random));
        }
        template
    }

    fn row_requests<'a>(
        template: &'a VarRequest,
        request: &ReportRequest,
    ) -> impl Iterator<Item = (VarMethod, f64, VarRequest)> + 'a {
        let confidences = request.confidence_levels();
        VarMethod::ALL.into_iter().flat_map(move |method| {
            confidences.clone().into_iter().map(move |confidence| {
                let row_request = template.clone().with_method(method).with_confidence(confidence);
                (method, confidence, row_request)
            })
        })
    }

    fn row(method: VarMethod, confidence: f64, outcome: RiskResult<VarResult>) -> ReportRow {
        match outcome {
            Ok(result) => ReportRow {
                method,
                confidence,
                value: Some(result.value),
                error_kind: None,
                error: None,
            },
            Err(err) => {
                warn!("report row {method} at {confidence} failed: {err}");
                ReportRow {
                    method,
                    confidence,
                    value: None,
                    error_kind: Some(err.kind()),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    fn assemble(template: &VarRequest, rows: Vec<ReportRow>) -> Self {
        debug!(
            "VaR report: {} rows over {} returns",
            rows.len(),
            template.returns.len()
        );

        Self {
            observations: template.returns.len(),
            horizon_days: template.horizon_days,
            seed: template.seed,
            rows,
        }
    }

    /// Row for `method` at `confidence`, if tabulated.
    #[must_use]
    pub fn get(&self, method: VarMethod, confidence: f64) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|row| row.method == method && (row.confidence - confidence).abs() < 1e-12)
    }

    /// Rows for a single method.
    pub fn rows_for(&self, method: VarMethod) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(move |row| row.method == method)
    }
}
