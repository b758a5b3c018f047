//! Inverse-Rodbard response model.
//!
//! The model is implemented as small, pure functions so that the fitting and
//! table-building code can stay free of filesystem and state concerns.

pub mod rodbard;

pub use rodbard::*;
