//! The shared run pipeline:
//!
//! configuration -> pattern synthesis -> brightness table -> application -> images
//!
//! `build` computes everything in memory (and is what the tests drive);
//! `run` additionally writes the image batch. Failures propagate before the
//! image batch is written, so a failed run never leaves partial pattern
//! output behind.

use std::collections::BTreeMap;

use log::info;

use crate::config::{CalibrationSource, Config};
use crate::debug::{DiagnosticSink, DirSink};
use crate::domain::{LookupTable, SampleSet};
use crate::error::AppError;
use crate::fit::fit_rodbard;
use crate::io;
use crate::lut::{LevelMap, build_table};
use crate::pattern::{Gray16Frame, make_sine_stack};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub images: BTreeMap<String, Gray16Frame>,
    /// The brightness table that was applied, if calibration was enabled.
    pub table: Option<LookupTable>,
}

/// Execute the full pipeline and write the image batch.
pub fn run(config: &Config) -> Result<(), AppError> {
    let output = build(config)?;
    info!(
        "saving {} images to '{}'",
        output.images.len(),
        config.patterns_dir.display()
    );
    io::image::save_batch(&config.patterns_dir, &output.images)
}

/// Execute the pipeline up to (but not including) the image batch write.
pub fn build(config: &Config) -> Result<RunOutput, AppError> {
    // 1) Synthesize the phase-shifted stack.
    info!(
        "generating {} {} fringe patterns ({}x{}, wavelength {})",
        config.fringe.n_phase_steps,
        config.fringe.direction.key(),
        config.fringe.n_cols,
        config.fringe.n_rows,
        config.fringe.wave_length
    );
    let mut images = make_sine_stack(&config.fringe);

    // 2) Resolve the brightness table.
    let table = match &config.calibration {
        None => None,
        Some(CalibrationSource::Table(path)) => {
            info!("loading brightness table from '{}'", path.display());
            Some(io::table::load_table(path)?)
        }
        Some(CalibrationSource::Measurements { samples, table_out }) => {
            let samples = io::table::load_samples(samples)?;
            info!("fitting brightness response to {} calibration samples", samples.len());
            let fit = fit_rodbard(&samples)?;
            info!(
                "fit converged after {} iterations (rmse {:.4})",
                fit.iterations, fit.rmse
            );

            // The table must cover every level the patterns can contain.
            let nominal = config.fringe.level_range();
            let table = build_table(&fit.params, &nominal)?;

            if let Some(dir) = &config.debug_dump_dir {
                let mut sink = DirSink::new(dir)?;
                dump_vectors(&mut sink, &samples, &table)?;
            }
            if let Some(path) = table_out {
                info!("writing brightness table to '{}'", path.display());
                io::table::save_table(path, &table)?;
            }
            Some(table)
        }
    };

    // 3) Remap pattern levels through the table.
    if let Some(table) = &table {
        let map = LevelMap::new(table)?;
        for frame in images.values_mut() {
            map.apply(frame)?;
        }
    }

    Ok(RunOutput { images, table })
}

fn dump_vectors(
    sink: &mut dyn DiagnosticSink,
    samples: &SampleSet,
    table: &LookupTable,
) -> Result<(), AppError> {
    let given: Vec<i64> = samples.given_inputs().iter().map(|&v| i64::from(v)).collect();
    sink.vector_i64("given_inputs", &given)?;
    sink.vector_f64("measured_outputs", samples.measured_outputs())?;

    let nominal: Vec<i64> = table.nominal_outputs().iter().map(|&v| i64::from(v)).collect();
    sink.vector_i64("nominal_outputs", &nominal)?;
    sink.vector_i64("computed_inputs", table.computed_inputs())?;
    Ok(())
}
