//! Standard normal distribution.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::error::{ensure_finite, MathError, MathResult};

// Acklam's rational approximation coefficients.
const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];
const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Break-point between the tail and central regions of the approximation.
const P_LOW: f64 = 0.02425;

/// Standard normal cumulative distribution function Φ(x).
///
/// Evaluated through the complementary error function, which keeps full
/// relative precision deep in the lower tail.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x).
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Inverse of the standard normal CDF: returns `z` such that Φ(z) = `p`.
///
/// Uses Acklam's rational approximation (relative error below 1.15e-9)
/// followed by one Halley refinement step against [`norm_cdf`], which brings
/// the result to full double precision for all `p` in (0, 1).
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] when `p` is not strictly between 0 and 1
/// (this includes NaN), and [`MathError::NonFinite`] if the refinement step
/// degenerates.
///
/// # Example
///
/// ```rust
/// use varlens_math::distributions::inverse_norm_cdf;
///
/// let z = inverse_norm_cdf(0.975).unwrap();
/// assert!((z - 1.959963984540054).abs() < 1e-12);
/// ```
pub fn inverse_norm_cdf(p: f64) -> MathResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_input(format!(
            "probability must lie strictly between 0 and 1, got {p}"
        )));
    }

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail(q)
    };

    // Halley step
    let e = norm_cdf(x) - p;
    let u = e * (2.0 * PI).sqrt() * (0.5 * x * x).exp();
    let refined = x - u / (1.0 + 0.5 * x * u);

    ensure_finite(refined, "inverse normal CDF")
}

fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(norm_cdf(1.959963984540054), 0.975, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-1.6448536269514722), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_pdf_peak() {
        assert_relative_eq!(norm_pdf(0.0), 0.3989422804014327, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), norm_pdf(-1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_common_confidence_levels() {
        assert_relative_eq!(inverse_norm_cdf(0.90).unwrap(), 1.2815515655446004, epsilon = 1e-12);
        assert_relative_eq!(inverse_norm_cdf(0.95).unwrap(), 1.6448536269514722, epsilon = 1e-12);
        assert_relative_eq!(inverse_norm_cdf(0.99).unwrap(), 2.3263478740408408, epsilon = 1e-12);
        assert_relative_eq!(inverse_norm_cdf(0.5).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_tails() {
        assert_relative_eq!(inverse_norm_cdf(1e-10).unwrap(), -6.361340902404056, epsilon = 1e-9);
        assert_relative_eq!(inverse_norm_cdf(0.999).unwrap(), 3.090232306167813, epsilon = 1e-10);
        assert_relative_eq!(inverse_norm_cdf(0.01).unwrap(), -2.3263478740408408, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_rejects_out_of_range() {
        for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(
                matches!(inverse_norm_cdf(p), Err(MathError::InvalidInput { .. })),
                "p = {p} should be rejected"
            );
        }
    }

    #[test]
    fn test_matches_statrs() {
        use statrs::distribution::{ContinuousCDF, Normal};

        let reference = Normal::new(0.0, 1.0).unwrap();
        for p in [0.001, 0.0242, 0.0243, 0.3, 0.6, 0.9757, 0.9999] {
            assert_relative_eq!(
                inverse_norm_cdf(p).unwrap(),
                reference.inverse_cdf(p),
                epsilon = 1e-8
            );
        }
    }

    proptest! {
        #[test]
        fn prop_inverse_round_trips_through_cdf(p in 1e-6f64..(1.0 - 1e-6)) {
            let z = inverse_norm_cdf(p).unwrap();
            prop_assert!((norm_cdf(z) - p).abs() < 1e-12);
        }

        #[test]
        fn prop_inverse_is_monotone(p in 1e-6f64..0.99, dp in 1e-4f64..0.009) {
            prop_assert!(inverse_norm_cdf(p).unwrap() < inverse_norm_cdf(p + dp).unwrap());
        }
    }
}
