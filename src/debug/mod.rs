//! Diagnostic vector dumps.
//!
//! The numeric core never touches the filesystem; when the configuration
//! asks for dumps, the pipeline injects a sink and feeds it the calibration
//! vectors (given inputs, measured outputs, nominal outputs, computed
//! inputs). Anything implementing `DiagnosticSink` can capture them; the
//! shipped implementation writes one flat text file per vector.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::table::save_vector;

/// Receiver for named diagnostic vectors.
pub trait DiagnosticSink {
    fn vector_i64(&mut self, name: &str, values: &[i64]) -> Result<(), AppError>;
    fn vector_f64(&mut self, name: &str, values: &[f64]) -> Result<(), AppError>;
}

/// Sink writing each vector to `<dir>/<name>.txt` in the flat table format.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(format!("failed to create dump directory '{}': {e}", dir.display()))
        })?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn target(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }
}

impl DiagnosticSink for DirSink {
    fn vector_i64(&mut self, name: &str, values: &[i64]) -> Result<(), AppError> {
        save_vector(&self.target(name), values)
    }

    fn vector_f64(&mut self, name: &str, values: &[f64]) -> Result<(), AppError> {
        save_vector(&self.target(name), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_sink_writes_one_file_per_vector() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path()).unwrap();

        sink.vector_i64("given_inputs", &[0, 128, 255]).unwrap();
        sink.vector_f64("measured_outputs", &[10.0, 50.5, 90.0]).unwrap();

        let given = fs::read_to_string(dir.path().join("given_inputs.txt")).unwrap();
        assert_eq!(given, "0 128 255\n");
        let measured = fs::read_to_string(dir.path().join("measured_outputs.txt")).unwrap();
        assert_eq!(measured, "10 50.5 90\n");
    }
}
