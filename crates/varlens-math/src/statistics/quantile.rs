//! Empirical quantiles from order statistics.
//!
//! All functions use the same convention: for a sample of size `N` and
//! probability `p`, the 0-based rank is `r = p * (N - 1)`. When `r` falls
//! between two order statistics the result is linearly interpolated between
//! them, so `p = 0` yields the minimum and `p = 1` the maximum.

use crate::error::{ensure_finite, MathError, MathResult};

/// Quantile of a sample that is already sorted in ascending order.
///
/// # Arguments
///
/// * `sorted` - Ascending sample, at least one element
/// * `p` - Probability in `[0, 1]`
///
/// # Example
///
/// ```rust
/// use varlens_math::statistics::sorted_quantile;
///
/// let sorted = [-0.05, -0.03, -0.01, 0.0, 0.01, 0.02, 0.04];
/// let q = sorted_quantile(&sorted, 0.10).unwrap();
/// assert!((q - (-0.038)).abs() < 1e-12);
/// ```
pub fn sorted_quantile(sorted: &[f64], p: f64) -> MathResult<f64> {
    let (lo, hi, frac) = rank(sorted.len(), p)?;
    interpolate(sorted[lo], sorted[hi], frac)
}

/// Quantile of an unsorted sample. The input is left untouched.
pub fn empirical_quantile(values: &[f64], p: f64) -> MathResult<f64> {
    let mut scratch = values.to_vec();
    quantile_in_place(&mut scratch, p)
}

/// Quantile of an unsorted sample, reordering `values` in place.
///
/// Only the two bracketing order statistics are located (selection rather
/// than a full sort), which matters for large simulated samples. Afterwards
/// `values` is partitioned around the lower bracketing rank.
///
/// # Errors
///
/// * [`MathError::InsufficientData`] for an empty sample
/// * [`MathError::InvalidInput`] when `p` is outside `[0, 1]`
/// * [`MathError::NonFinite`] when the sample contains NaN or an infinity
pub fn quantile_in_place(values: &mut [f64], p: f64) -> MathResult<f64> {
    let (lo, hi, frac) = rank(values.len(), p)?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("quantile sample"));
    }

    let (_, lower, above) = values.select_nth_unstable_by(lo, f64::total_cmp);
    let lower = *lower;
    let upper = if hi == lo {
        lower
    } else {
        above.iter().copied().fold(f64::INFINITY, f64::min)
    };

    interpolate(lower, upper, frac)
}

/// Splits the fractional rank into bracketing indices and a weight.
fn rank(len: usize, p: f64) -> MathResult<(usize, usize, f64)> {
    if len == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must lie in [0, 1], got {p}"
        )));
    }

    let r = p * (len - 1) as f64;
    let lo = r.floor() as usize;
    let hi = (r.ceil() as usize).min(len - 1);
    Ok((lo, hi, r - lo as f64))
}

fn interpolate(lower: f64, upper: f64, frac: f64) -> MathResult<f64> {
    ensure_finite(lower + frac * (upper - lower), "quantile interpolation")
}
