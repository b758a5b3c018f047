//! 16-bit grayscale image output.
//!
//! Frames are written as PNG, the only widely supported lossless raster
//! format with a native 16-bit grayscale channel. One file per stack entry,
//! filename derived from the map key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::pattern::Gray16Frame;

/// Save every frame of a named stack into `dir` as `<name>.png`.
pub fn save_batch(dir: &Path, frames: &BTreeMap<String, Gray16Frame>) -> Result<(), AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::Io(format!("failed to create output directory '{}': {e}", dir.display()))
    })?;

    for (name, frame) in frames {
        let path = dir.join(format!("{name}.png"));
        frame.save(&path).map_err(|e| {
            AppError::Io(format!("failed to save image '{}': {e}", path.display()))
        })?;
    }
    Ok(())
}
