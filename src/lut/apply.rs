//! Apply a brightness table to synthesized pattern levels.
//!
//! The table is expanded once into a dense 65536-slot level map so that
//! per-pixel application is a single indexed load. Levels the table does not
//! cover, and computed inputs that cannot be represented in the 16-bit
//! grayscale range, are hard errors — a calibrated pattern must never contain
//! silently clamped or passed-through pixels.

use crate::domain::LookupTable;
use crate::error::AppError;

/// Dense nominal-level -> input-level map built from a 2-row table.
#[derive(Debug)]
pub struct LevelMap {
    slots: Vec<Option<u16>>,
}

impl LevelMap {
    pub fn new(table: &LookupTable) -> Result<Self, AppError> {
        let mut slots = vec![None; usize::from(u16::MAX) + 1];
        for (nominal, computed) in table.entries() {
            let input = u16::try_from(computed).map_err(|_| {
                AppError::InvalidInput(format!(
                    "computed input {computed} for nominal level {nominal} is outside the 16-bit range [0, 65535]"
                ))
            })?;
            slots[usize::from(nominal)] = Some(input);
        }
        Ok(Self { slots })
    }

    /// Remap every level in `levels` in place.
    pub fn apply(&self, levels: &mut [u16]) -> Result<(), AppError> {
        for level in levels.iter_mut() {
            match self.slots[usize::from(*level)] {
                Some(mapped) => *level = mapped,
                None => {
                    return Err(AppError::InvalidInput(format!(
                        "brightness table has no entry for level {level}"
                    )));
                }
            }
        }
        Ok(())
    }
}
