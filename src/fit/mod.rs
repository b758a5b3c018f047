//! Curve fitting.
//!
//! Responsibilities:
//!
//! - widen integer calibration samples into the numeric core exactly once
//! - run a deterministic Levenberg-Marquardt fit of the inverse-Rodbard model
//! - surface non-convergence with its iteration count and final residual

pub mod fitter;

pub use fitter::*;
