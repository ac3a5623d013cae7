//! # VarLens Math
//!
//! Numerical building blocks for the VarLens Value at Risk engine.
//!
//! This crate provides:
//!
//! - **Distributions**: Standard normal CDF, PDF and inverse CDF
//! - **Statistics**: Order-statistic quantiles, sample moments, rolling window sums
//! - **Returns**: Day-over-day return construction from price series
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Non-finite intermediate values are reported, never returned
//! - **Allocation Aware**: Quantiles can be taken in place over large simulated samples

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::doc_markdown)]

pub mod distributions;
pub mod error;
pub mod returns;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::returns::simple_returns;
    pub use crate::statistics::{
        empirical_quantile, quantile_in_place, rolling_sums, sorted_quantile, Moments,
    };
}

pub use error::{MathError, MathResult};
