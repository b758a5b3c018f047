//! Input/output helpers.
//!
//! - flat 2-row text tables and calibration measurement files (`table`)
//! - 16-bit grayscale PNG batch save (`image`)

pub mod image;
pub mod table;

pub use table::*;
