//! Evaluation of the inverse-Rodbard brightness response model.
//!
//! Functional form (the zero-floor, monotone-increasing 3-parameter member of
//! the Rodbard family; a logistic in log-input space):
//!
//! ```text
//! f(x) = saturation / (1 + (midpoint / x)^slope)        x > 0
//! f(0) = 0
//! ```
//!
//! with `saturation > 0`, `slope > 0`, `midpoint > 0`. The curve rises from 0,
//! passes `saturation / 2` at `x = midpoint`, and approaches `saturation` at
//! full drive. Closed-form algebraic inverse:
//!
//! ```text
//! f⁻¹(y) = midpoint · (y / (saturation − y))^(1 / slope)
//! ```
//!
//! defined on `0 <= y < saturation`. Outside that range the root term receives
//! a negative argument, so inversion is refused rather than producing NaN.
//!
//! Numerical notes:
//! - `f` is computed through `t = (midpoint/x)^slope` so that extreme slopes
//!   degrade to 0 / `saturation` instead of overflowing an `x^slope` term.
//! - At `x = 0` the analytic limits of `f` and all three partials are 0; the
//!   same limits apply whenever `t` overflows to infinity.

use crate::domain::RodbardParams;

/// Predict the measured output for a commanded input level.
pub fn predict(p: &RodbardParams, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let t = (p.midpoint / x).powf(p.slope);
    p.saturation / (1.0 + t)
}

/// Partial derivatives of `predict` with respect to
/// `(saturation, slope, midpoint)`, used to build the fit jacobian.
pub fn jacobian_row(p: &RodbardParams, x: f64) -> [f64; 3] {
    if x <= 0.0 {
        return [0.0, 0.0, 0.0];
    }
    let t = (p.midpoint / x).powf(p.slope);
    if !t.is_finite() {
        // Far below the curve's rise: the model is flat at 0 here.
        return [0.0, 0.0, 0.0];
    }
    let w = 1.0 / (1.0 + t);
    let s = t * w * w;
    [
        w,
        -p.saturation * s * (p.midpoint / x).ln(),
        -p.saturation * s * p.slope / p.midpoint,
    ]
}

/// Evaluate the closed-form inverse at a nominal output level.
///
/// Returns `None` when `y` lies outside the invertible domain
/// `[0, saturation)`.
pub fn invert(p: &RodbardParams, y: f64) -> Option<f64> {
    if !y.is_finite() || y < 0.0 || y >= p.saturation {
        return None;
    }
    if y == 0.0 {
        return Some(0.0);
    }
    let ratio = y / (p.saturation - y);
    Some(p.midpoint * ratio.powf(1.0 / p.slope))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RodbardParams {
        RodbardParams { saturation: 95.0, slope: 1.8, midpoint: 120.0 }
    }

    #[test]
    fn predict_hits_known_landmarks() {
        let p = params();
        assert_eq!(predict(&p, 0.0), 0.0);
        let half = predict(&p, p.midpoint);
        assert!((half - p.saturation / 2.0).abs() < 1e-12);
        assert!(predict(&p, 1e9) < p.saturation);
        assert!(predict(&p, 1e9) > 0.99 * p.saturation);
    }

    #[test]
    fn predict_is_monotone_increasing() {
        let p = params();
        let mut prev = predict(&p, 0.0);
        for x in 1..=400 {
            let y = predict(&p, f64::from(x));
            assert!(y > prev);
            prev = y;
        }
    }

    #[test]
    fn invert_round_trips_predict() {
        let p = params();
        for x in [0.0, 1.0, 17.5, 120.0, 255.0, 4096.0] {
            let y = predict(&p, x);
            let back = invert(&p, y).unwrap();
            assert!((back - x).abs() < 1e-9 * x.max(1.0), "x={x} back={back}");
        }
    }

    #[test]
    fn invert_domain_edges() {
        let p = params();
        // Lower edge of the valid range succeeds.
        assert_eq!(invert(&p, 0.0), Some(0.0));
        // Just inside the upper edge succeeds.
        assert!(invert(&p, p.saturation - 1e-9).is_some());
        // The upper edge itself and anything beyond is out of domain.
        assert_eq!(invert(&p, p.saturation), None);
        assert_eq!(invert(&p, p.saturation + 1e-9), None);
        // One epsilon below zero is out of domain.
        assert_eq!(invert(&p, -1e-9), None);
        assert_eq!(invert(&p, f64::NAN), None);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let p = params();
        let h = 1e-6;
        for x in [1.0, 60.0, 120.0, 255.0] {
            let j = jacobian_row(&p, x);
            let fd = [
                (predict(&RodbardParams { saturation: p.saturation + h, ..p }, x)
                    - predict(&RodbardParams { saturation: p.saturation - h, ..p }, x))
                    / (2.0 * h),
                (predict(&RodbardParams { slope: p.slope + h, ..p }, x)
                    - predict(&RodbardParams { slope: p.slope - h, ..p }, x))
                    / (2.0 * h),
                (predict(&RodbardParams { midpoint: p.midpoint + h, ..p }, x)
                    - predict(&RodbardParams { midpoint: p.midpoint - h, ..p }, x))
                    / (2.0 * h),
            ];
            for (a, b) in j.iter().zip(fd.iter()) {
                assert!((a - b).abs() < 1e-6, "x={x} analytic={a} fd={b}");
            }
        }
    }

    #[test]
    fn boundary_point_is_flat() {
        let p = params();
        assert_eq!(jacobian_row(&p, 0.0), [0.0, 0.0, 0.0]);
    }
}
