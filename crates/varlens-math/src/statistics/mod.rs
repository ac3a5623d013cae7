//! Descriptive statistics over return samples.

mod moments;
mod quantile;
mod windows;

pub use moments::Moments;
pub use quantile::{empirical_quantile, quantile_in_place, sorted_quantile};
pub use windows::rolling_sums;
