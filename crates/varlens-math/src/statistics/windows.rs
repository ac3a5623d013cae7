//! Rolling window aggregation.

use crate::error::{MathError, MathResult};

/// Sums of consecutive windows of `window` values, advancing `step` values
/// between windows.
///
/// Windows are anchored at the end of the slice: the last window always
/// ends on the final element, and any leftover values that do not fill a
/// window are dropped from the front. Output is in chronological order.
///
/// With `step == 1` this yields the `N - window + 1` overlapping sums; with
/// `step == window` it yields `N / window` disjoint sums.
///
/// # Example
///
/// ```rust
/// use varlens_math::statistics::rolling_sums;
///
/// let sums = rolling_sums(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 2).unwrap();
/// assert_eq!(sums, vec![5.0, 9.0]);
/// ```
pub fn rolling_sums(values: &[f64], window: usize, step: usize) -> MathResult<Vec<f64>> {
    if window == 0 || step == 0 {
        return Err(MathError::invalid_input(format!(
            "window ({window}) and step ({step}) must be positive"
        )));
    }
    if values.len() < window {
        return Ok(Vec::new());
    }

    let count = (values.len() - window) / step + 1;
    let first_start = values.len() - window - (count - 1) * step;

    let sums = (0..count)
        .map(|i| {
            let start = first_start + i * step;
            values[start..start + window].iter().sum()
        })
        .collect();

    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_windows() {
        let sums = rolling_sums(&[1.0, 2.0, 3.0, 4.0], 2, 1).unwrap();
        assert_eq!(sums, vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_disjoint_windows_anchor_at_end() {
        // The leading 1.0 does not fill a window and is dropped.
        let sums = rolling_sums(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], 3, 3).unwrap();
        assert_eq!(sums, vec![9.0, 18.0]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = [0.1, -0.2, 0.3];
        assert_eq!(rolling_sums(&values, 1, 1).unwrap(), values.to_vec());
    }

    #[test]
    fn test_window_longer_than_series() {
        assert!(rolling_sums(&[1.0, 2.0], 3, 1).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            rolling_sums(&[1.0], 0, 1),
            Err(MathError::InvalidInput { .. })
        ));
    }
}
