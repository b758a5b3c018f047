//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during fitting and table construction
//! - written to / reloaded from flat text files
//! - cheap to clone across the pipeline

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fringe orientation.
///
/// `Vertical` fringes run down the image, so intensity varies with the
/// column index; `Horizontal` fringes vary with the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDirection {
    Vertical,
    Horizontal,
}

impl WaveDirection {
    /// Stable key prefix used for image names and filenames.
    pub fn key(self) -> &'static str {
        match self {
            WaveDirection::Vertical => "vertical",
            WaveDirection::Horizontal => "horizontal",
        }
    }
}

/// Geometry and wave parameters of one phase-shifted pattern stack.
///
/// Validated at configuration load: `amplitude <= offset` and
/// `offset + amplitude <= 65535`, so every synthesized level fits the 16-bit
/// grayscale range.
#[derive(Debug, Clone)]
pub struct FringeSpec {
    pub n_rows: u32,
    pub n_cols: u32,
    pub amplitude: u16,
    pub offset: u16,
    pub wave_length: f64,
    pub n_phase_steps: u32,
    pub direction: WaveDirection,
}

impl FringeSpec {
    /// Lowest brightness level any pattern in the stack can contain.
    pub fn min_level(&self) -> u16 {
        self.offset - self.amplitude
    }

    /// Highest brightness level any pattern in the stack can contain.
    pub fn max_level(&self) -> u16 {
        self.offset + self.amplitude
    }

    /// Every producible level, lowest to highest. This is the nominal-output
    /// list a brightness table must cover to correct this stack.
    pub fn level_range(&self) -> Vec<u16> {
        (self.min_level()..=self.max_level()).collect()
    }
}

/// Calibration samples: intensity levels actually commanded during
/// calibration, paired with the brightness the device measured for each.
///
/// Parallel sequences of equal length; immutable once constructed. Integers
/// stay integers here — widening to `f64` happens once, inside the fitter.
#[derive(Debug, Clone)]
pub struct SampleSet {
    given_inputs: Vec<u16>,
    measured_outputs: Vec<f64>,
}

impl SampleSet {
    pub fn new(given_inputs: Vec<u16>, measured_outputs: Vec<f64>) -> Result<Self, AppError> {
        if given_inputs.len() != measured_outputs.len() {
            return Err(AppError::InvalidInput(format!(
                "sample sequences must have equal length, got {} given inputs and {} measured outputs",
                given_inputs.len(),
                measured_outputs.len()
            )));
        }
        Ok(Self { given_inputs, measured_outputs })
    }

    pub fn len(&self) -> usize {
        self.given_inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.given_inputs.is_empty()
    }

    pub fn given_inputs(&self) -> &[u16] {
        &self.given_inputs
    }

    pub fn measured_outputs(&self) -> &[f64] {
        &self.measured_outputs
    }
}

/// The three coefficients of the fitted inverse-Rodbard response model.
///
/// See `models::rodbard` for the functional form. All three are strictly
/// positive for any fit this crate produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodbardParams {
    /// Brightness the response approaches at full drive.
    pub saturation: f64,
    /// Steepness of the sigmoid (in log-input space).
    pub slope: f64,
    /// Input level producing half of `saturation`.
    pub midpoint: f64,
}

/// Converged fit with its diagnostics.
#[derive(Debug, Clone)]
pub struct RodbardFit {
    pub params: RodbardParams,
    /// Outer Levenberg-Marquardt iterations actually run.
    pub iterations: usize,
    pub sse: f64,
    pub rmse: f64,
}

/// A 2xM brightness-correction table.
///
/// Row 0 holds the nominal (desired) output levels exactly as supplied; row 1
/// holds the input level to command for each, rounded to the nearest integer.
/// Element order is preserved; both rows always have equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    nominal_outputs: Vec<u16>,
    computed_inputs: Vec<i64>,
}

impl LookupTable {
    pub fn new(nominal_outputs: Vec<u16>, computed_inputs: Vec<i64>) -> Result<Self, AppError> {
        if nominal_outputs.len() != computed_inputs.len() {
            return Err(AppError::InvalidInput(format!(
                "lookup table rows must have equal length, got {} nominal outputs and {} computed inputs",
                nominal_outputs.len(),
                computed_inputs.len()
            )));
        }
        Ok(Self { nominal_outputs, computed_inputs })
    }

    pub fn len(&self) -> usize {
        self.nominal_outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nominal_outputs.is_empty()
    }

    pub fn nominal_outputs(&self) -> &[u16] {
        &self.nominal_outputs
    }

    pub fn computed_inputs(&self) -> &[i64] {
        &self.computed_inputs
    }

    /// Iterate `(nominal, computed)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (u16, i64)> + '_ {
        self.nominal_outputs
            .iter()
            .copied()
            .zip(self.computed_inputs.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_length_mismatch() {
        let err = SampleSet::new(vec![0, 128], vec![10.0]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2") && msg.contains("1"), "lengths must be named: {msg}");
    }

    #[test]
    fn lookup_table_rejects_ragged_rows() {
        assert!(LookupTable::new(vec![1, 2, 3], vec![1, 2]).is_err());
    }

    #[test]
    fn level_range_is_inclusive_and_ordered() {
        let spec = FringeSpec {
            n_rows: 4,
            n_cols: 4,
            amplitude: 2,
            offset: 10,
            wave_length: 8.0,
            n_phase_steps: 3,
            direction: WaveDirection::Vertical,
        };
        assert_eq!(spec.level_range(), vec![8, 9, 10, 11, 12]);
    }
}
