//! Mathematical utilities: the damped normal-equations step used by the
//! Levenberg-Marquardt fitter.

pub mod lm;

pub use lm::*;
