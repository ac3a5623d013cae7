//! Probability distributions.
//!
//! Only the standard normal is needed by the risk engine: parametric VaR
//! maps a confidence level to a critical value through its inverse CDF.

mod normal;

pub use normal::*;
