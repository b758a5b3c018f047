//! Damped least-squares step solve.
//!
//! One Levenberg-Marquardt iteration solves
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀr
//! ```
//!
//! for the parameter update `δ`. The parameter dimension is fixed at 3, so we
//! use nalgebra's stack-allocated `Matrix3`/`Vector3` and an LU solve.
//!
//! Scaling the damping by `diag(JᵀJ)` (rather than the identity) keeps the
//! step well-behaved when the three parameters live on very different scales,
//! which they do here: saturation is a brightness, midpoint an input level,
//! slope a unitless exponent.

use nalgebra::{Matrix3, Vector3};

/// Floor applied to diagonal damping terms so a flat direction still damps.
const DIAG_FLOOR: f64 = 1e-12;

/// Solve one damped step. Returns `None` if the damped system is singular or
/// the solution is non-finite.
pub fn solve_damped_step(
    h: &Matrix3<f64>,
    g: &Vector3<f64>,
    lambda: f64,
) -> Option<Vector3<f64>> {
    let mut damped = *h;
    for i in 0..3 {
        damped[(i, i)] += lambda * h[(i, i)].max(DIAG_FLOOR);
    }

    let step = damped.lu().solve(g)?;
    if step.iter().all(|v| v.is_finite()) {
        Some(step)
    } else {
        None
    }
}
