//! Levenberg-Marquardt fit of the inverse-Rodbard response model.
//!
//! Given calibration samples `(given input x_i, measured output y_i)` we
//! minimize
//!
//! ```text
//! SSE(p) = Σ (y_i - f(x_i; p))²
//! ```
//!
//! over the three model parameters with a damped Gauss-Newton (LM) loop:
//! assemble `H = JᵀJ` and `g = Jᵀr`, solve the damped step, and accept it only
//! if it reduces the SSE, otherwise raise the damping and retry.
//!
//! Determinism: there is no RNG anywhere. The initial guess is a fixed
//! function of the data, so identical inputs always produce identical
//! parameters:
//!
//! - `saturation₀ = 1.05 · max(y)` (1.0 if no measured output is positive)
//! - `slope₀ = 1`
//! - `midpoint₀ = x` of the sample whose measured output is closest to
//!   `saturation₀ / 2`, falling back to the mean positive input, then 1.0,
//!   so the guess stays strictly positive.
//!
//! The model is only meaningful on the open positive-parameter region, so
//! candidate steps leaving it are rejected exactly like non-improving steps.

use nalgebra::{Matrix3, Vector3};

use crate::domain::{RodbardFit, RodbardParams, SampleSet};
use crate::error::AppError;
use crate::math::solve_damped_step;
use crate::models::{jacobian_row, predict};

/// Free parameters of the model; also the minimum sample count.
const N_PARAMS: usize = 3;

/// Outer iteration budget.
const MAX_ITERS: usize = 100;

/// Relative SSE improvement below which the fit is considered converged.
const FTOL: f64 = 1e-12;

/// Gradient norm below which the fit is considered converged.
const GTOL: f64 = 1e-10;

/// Gradient norm under which a fully damped-out iteration still counts as
/// converged (a flat minimum rather than a failure).
const GTOL_STALL: f64 = 1e-6;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MAX: f64 = 1e10;

/// Fit the inverse-Rodbard model to a calibration sample set.
pub fn fit_rodbard(samples: &SampleSet) -> Result<RodbardFit, AppError> {
    let n = samples.len();
    if n < N_PARAMS {
        return Err(AppError::InvalidInput(format!(
            "need at least {N_PARAMS} samples to fit {N_PARAMS} parameters, got {n}"
        )));
    }

    // Widen once at the entry of the numeric core.
    let xs: Vec<f64> = samples.given_inputs().iter().map(|&v| f64::from(v)).collect();
    let ys = samples.measured_outputs();

    let mut params = initial_guess(&xs, ys);
    let mut current_sse = sse(&params, &xs, ys);
    let mut lambda = LAMBDA_INIT;
    let mut iterations = 0;

    for iter in 1..=MAX_ITERS {
        iterations = iter;

        let mut h = Matrix3::<f64>::zeros();
        let mut g = Vector3::<f64>::zeros();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let j = Vector3::from(jacobian_row(&params, x));
            let r = y - predict(&params, x);
            h += j * j.transpose();
            g += j * r;
        }

        if g.norm() < GTOL {
            return Ok(finish(params, iterations, current_sse, n));
        }

        // Inner damping loop: raise lambda until a step improves the SSE.
        loop {
            let candidate = solve_damped_step(&h, &g, lambda).and_then(|step| {
                let p = RodbardParams {
                    saturation: params.saturation + step[0],
                    slope: params.slope + step[1],
                    midpoint: params.midpoint + step[2],
                };
                in_region(&p).then_some(p)
            });

            if let Some(p) = candidate {
                let s = sse(&p, &xs, ys);
                if s.is_finite() && s <= current_sse {
                    let improvement = current_sse - s;
                    params = p;
                    let prev = current_sse;
                    current_sse = s;
                    lambda = (lambda * 0.5).max(1e-12);
                    if improvement <= FTOL * prev.max(f64::MIN_POSITIVE) {
                        return Ok(finish(params, iterations, current_sse, n));
                    }
                    break;
                }
            }

            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                // No step at any damping improves the SSE. With a near-zero
                // gradient that is a minimum; otherwise the fit is stuck.
                if g.norm() < GTOL_STALL {
                    return Ok(finish(params, iterations, current_sse, n));
                }
                return Err(AppError::Convergence { iterations, residual: current_sse });
            }
        }
    }

    Err(AppError::Convergence { iterations, residual: current_sse })
}

fn finish(params: RodbardParams, iterations: usize, sse: f64, n: usize) -> RodbardFit {
    RodbardFit { params, iterations, sse, rmse: (sse / n as f64).sqrt() }
}

fn sse(p: &RodbardParams, xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let r = y - predict(p, x);
            r * r
        })
        .sum()
}

fn in_region(p: &RodbardParams) -> bool {
    p.saturation.is_finite()
        && p.slope.is_finite()
        && p.midpoint.is_finite()
        && p.saturation > 0.0
        && p.slope > 0.0
        && p.midpoint > 0.0
}

fn initial_guess(xs: &[f64], ys: &[f64]) -> RodbardParams {
    let y_max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let saturation = if y_max > 0.0 { 1.05 * y_max } else { 1.0 };

    let half = saturation / 2.0;
    let mut midpoint = f64::NAN;
    let mut best_dist = f64::INFINITY;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let d = (y - half).abs();
        if x > 0.0 && d < best_dist {
            best_dist = d;
            midpoint = x;
        }
    }
    if !(midpoint > 0.0) {
        let positive: Vec<f64> = xs.iter().copied().filter(|&x| x > 0.0).collect();
        midpoint = if positive.is_empty() {
            1.0
        } else {
            positive.iter().sum::<f64>() / positive.len() as f64
        };
    }

    RodbardParams { saturation, slope: 1.0, midpoint }
}
