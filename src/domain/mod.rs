//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the calibration sample set (`SampleSet`)
//! - fitted model parameters and fit diagnostics (`RodbardParams`, `RodbardFit`)
//! - the brightness lookup table (`LookupTable`)
//! - the fringe pattern geometry (`FringeSpec`, `WaveDirection`)

pub mod types;

pub use types::*;
