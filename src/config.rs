//! Typed XML configuration.
//!
//! The configuration file is a flat XML document with camelCase element
//! names. It is deserialized into `RawConfig` in one pass and then validated
//! all-or-nothing into `Config`: every required field is enumerated and typed
//! here, and any missing key, type error, or inconsistent combination fails
//! the load with the offending key named. No component downstream of this
//! module ever re-parses or re-validates configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{FringeSpec, WaveDirection};
use crate::error::AppError;

/// On-disk schema, field names as they appear in the XML file.
#[derive(Debug, Deserialize)]
#[serde(rename = "SineFringeConfig")]
struct RawConfig {
    #[serde(rename = "nRows")]
    n_rows: u32,
    #[serde(rename = "nCols")]
    n_cols: u32,
    #[serde(rename = "amplitude")]
    amplitude: u32,
    #[serde(rename = "offset")]
    offset: u32,
    #[serde(rename = "waveLength")]
    wave_length: f64,
    #[serde(rename = "nPhaseSteps")]
    n_phase_steps: u32,
    #[serde(rename = "waveDirection")]
    wave_direction: WaveDirection,
    #[serde(rename = "doBrightnessCalibration")]
    do_brightness_calibration: bool,
    #[serde(rename = "brightnessTablePath", default)]
    brightness_table_path: Option<PathBuf>,
    #[serde(rename = "brightnessMeasurementsPath", default)]
    brightness_measurements_path: Option<PathBuf>,
    #[serde(rename = "brightnessTableOutPath", default)]
    brightness_table_out_path: Option<PathBuf>,
    #[serde(rename = "debugDumpDir", default)]
    debug_dump_dir: Option<PathBuf>,
    #[serde(rename = "sineWavePatternsDir")]
    sine_wave_patterns_dir: PathBuf,
}

/// Where the brightness-correction table comes from.
#[derive(Debug, Clone)]
pub enum CalibrationSource {
    /// Load a previously computed 2-row table file.
    Table(PathBuf),
    /// Load raw calibration measurements, fit the response model, and build
    /// the table in-process; optionally persist it.
    Measurements {
        samples: PathBuf,
        table_out: Option<PathBuf>,
    },
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub fringe: FringeSpec,
    pub calibration: Option<CalibrationSource>,
    pub patterns_dir: PathBuf,
    pub debug_dump_dir: Option<PathBuf>,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "could not open configuration file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_xml_str(&text, &path.display().to_string())
    }

    /// Parse and validate configuration XML. `origin` is used in diagnostics
    /// (normally the file path).
    pub fn from_xml_str(text: &str, origin: &str) -> Result<Self, AppError> {
        let raw: RawConfig = quick_xml::de::from_str(text)
            .map_err(|e| AppError::Config(format!("could not parse '{origin}': {e}")))?;
        raw.validate(origin)
    }
}

impl RawConfig {
    fn validate(self, origin: &str) -> Result<Config, AppError> {
        let fail = |msg: String| Err(AppError::Config(format!("{origin}: {msg}")));

        if self.n_rows == 0 || self.n_cols == 0 {
            return fail(format!(
                "nRows and nCols must be >= 1, got {}x{}",
                self.n_rows, self.n_cols
            ));
        }
        if self.n_phase_steps == 0 {
            return fail("nPhaseSteps must be >= 1".to_string());
        }
        if !self.wave_length.is_finite() || self.wave_length <= 0.0 {
            return fail(format!("waveLength must be > 0, got {}", self.wave_length));
        }
        if self.amplitude > self.offset {
            return fail(format!(
                "amplitude ({}) must not exceed offset ({}) or patterns would dip below level 0",
                self.amplitude, self.offset
            ));
        }
        if self.offset + self.amplitude > 65535 {
            return fail(format!(
                "offset + amplitude ({} + {}) exceeds the 16-bit level range [0, 65535]",
                self.offset, self.amplitude
            ));
        }

        let calibration = if self.do_brightness_calibration {
            match (self.brightness_table_path, self.brightness_measurements_path) {
                (Some(_), Some(_)) => {
                    return fail(
                        "brightnessTablePath and brightnessMeasurementsPath are mutually exclusive"
                            .to_string(),
                    );
                }
                (None, None) => {
                    return fail(
                        "doBrightnessCalibration requires brightnessTablePath or brightnessMeasurementsPath"
                            .to_string(),
                    );
                }
                (Some(table), None) => {
                    if self.brightness_table_out_path.is_some() {
                        return fail(
                            "brightnessTableOutPath requires brightnessMeasurementsPath"
                                .to_string(),
                        );
                    }
                    Some(CalibrationSource::Table(table))
                }
                (None, Some(samples)) => Some(CalibrationSource::Measurements {
                    samples,
                    table_out: self.brightness_table_out_path,
                }),
            }
        } else {
            None
        };

        Ok(Config {
            fringe: FringeSpec {
                n_rows: self.n_rows,
                n_cols: self.n_cols,
                amplitude: self.amplitude as u16,
                offset: self.offset as u16,
                wave_length: self.wave_length,
                n_phase_steps: self.n_phase_steps,
                direction: self.wave_direction,
            },
            calibration,
            patterns_dir: self.sine_wave_patterns_dir,
            debug_dump_dir: self.debug_dump_dir,
        })
    }
}
