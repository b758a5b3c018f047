//! Lookup table construction from fitted model parameters.
//!
//! For each nominal output level the builder evaluates the closed-form
//! algebraic inverse of the fitted response — a direct formula, not a second
//! optimization — to obtain the input level that would reproduce it.
//!
//! Rounding policy: round-half-away-from-zero (`f64::round`). Fixed so that
//! the integer table is reproducible bit-for-bit across runs.

use crate::domain::{LookupTable, RodbardParams};
use crate::error::AppError;
use crate::models::invert;

/// Evaluate the model inverse at every nominal output level, in order.
///
/// Integer levels are widened to `f64` here, once; the caller receives the
/// unrounded predictions. The first level outside the invertible domain
/// aborts the whole computation with its value and index.
pub fn compute_all(params: &RodbardParams, nominal_outputs: &[u16]) -> Result<Vec<f64>, AppError> {
    let mut out = Vec::with_capacity(nominal_outputs.len());
    for (index, &level) in nominal_outputs.iter().enumerate() {
        let value = f64::from(level);
        let input = invert(params, value)
            .ok_or(AppError::Domain { value, index })?;
        out.push(input);
    }
    Ok(out)
}

/// Build the 2xM brightness table: row 0 the nominal levels verbatim, row 1
/// the computed inputs narrowed back to integers.
pub fn build_table(
    params: &RodbardParams,
    nominal_outputs: &[u16],
) -> Result<LookupTable, AppError> {
    let computed = compute_all(params, nominal_outputs)?;
    let rounded: Vec<i64> = computed.iter().map(|&v| round_half_away(v)).collect();
    LookupTable::new(nominal_outputs.to_vec(), rounded)
}

/// Round to the nearest integer, halves away from zero.
pub fn round_half_away(v: f64) -> i64 {
    v.round() as i64
}
