//! Flat delimited text tables.
//!
//! Two file kinds share one format — a whitespace-separated row per line:
//!
//! - lookup tables: row 0 nominal output levels, row 1 computed input levels
//!   (both integers, lossless round-trip)
//! - calibration measurements: row 0 given input levels (integers), row 1
//!   measured outputs (floats, written with Rust's shortest round-trip
//!   `Display`, so re-reading reproduces the exact value)
//!
//! Parse errors name the file, the row, and the offending token.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domain::{LookupTable, SampleSet};
use crate::error::AppError;

/// Write a lookup table as two integer rows.
pub fn save_table(path: &Path, table: &LookupTable) -> Result<(), AppError> {
    let text = format!(
        "{}\n{}\n",
        join_row(table.nominal_outputs()),
        join_row(table.computed_inputs())
    );
    fs::write(path, text)
        .map_err(|e| AppError::Io(format!("failed to write table '{}': {e}", path.display())))
}

/// Read a lookup table previously written by `save_table`.
pub fn load_table(path: &Path) -> Result<LookupTable, AppError> {
    let [row0, row1] = read_two_rows(path)?;
    let nominal = parse_row::<u16>(&row0, path, 1)?;
    let computed = parse_row::<i64>(&row1, path, 2)?;
    LookupTable::new(nominal, computed)
}

/// Write calibration measurements: given inputs then measured outputs.
pub fn save_samples(path: &Path, samples: &SampleSet) -> Result<(), AppError> {
    let text = format!(
        "{}\n{}\n",
        join_row(samples.given_inputs()),
        join_row(samples.measured_outputs())
    );
    fs::write(path, text).map_err(|e| {
        AppError::Io(format!("failed to write measurements '{}': {e}", path.display()))
    })
}

/// Read calibration measurements previously written by `save_samples`.
pub fn load_samples(path: &Path) -> Result<SampleSet, AppError> {
    let [row0, row1] = read_two_rows(path)?;
    let given = parse_row::<u16>(&row0, path, 1)?;
    let measured = parse_row::<f64>(&row1, path, 2)?;
    SampleSet::new(given, measured)
}

/// Write a single flat row (used for diagnostic vector dumps).
pub fn save_vector<T: Display>(path: &Path, values: &[T]) -> Result<(), AppError> {
    let text = format!("{}\n", join_row(values));
    fs::write(path, text)
        .map_err(|e| AppError::Io(format!("failed to write vector '{}': {e}", path.display())))
}

fn join_row<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_two_rows(path: &Path) -> Result<[String; 2], AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("failed to open '{}': {e}", path.display())))?;
    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if rows.len() != 2 {
        return Err(AppError::Io(format!(
            "'{}' must contain exactly 2 rows, found {}",
            path.display(),
            rows.len()
        )));
    }
    Ok([rows[0].to_string(), rows[1].to_string()])
}

fn parse_row<T: FromStr>(row: &str, path: &Path, row_number: usize) -> Result<Vec<T>, AppError>
where
    T::Err: Display,
{
    row.split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|e| {
                AppError::Io(format!(
                    "'{}' row {row_number}: could not parse '{token}': {e}",
                    path.display()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lut.txt");

        let table = LookupTable::new(vec![28, 29, 30, 31], vec![55, 61, 68, 76]).unwrap();
        save_table(&path, &table).unwrap();
        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn samples_round_trip_preserves_float_values_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measurements.txt");

        let samples = SampleSet::new(
            vec![0, 64, 128, 255],
            vec![9.8765432101, 31.25, 0.0000123456789, 88.0],
        )
        .unwrap();
        save_samples(&path, &samples).unwrap();
        let loaded = load_samples(&path).unwrap();
        assert_eq!(loaded.given_inputs(), samples.given_inputs());
        assert_eq!(loaded.measured_outputs(), samples.measured_outputs());
    }

    #[test]
    fn bad_token_names_file_row_and_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lut.txt");
        fs::write(&path, "10 20 30\n1 x 3\n").unwrap();

        let err = load_table(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 2") && msg.contains("'x'"), "{msg}");
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lut.txt");
        fs::write(&path, "10 20 30\n").unwrap();

        let err = load_table(&path).unwrap_err();
        assert!(err.to_string().contains("exactly 2 rows"), "{err}");
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_table(Path::new("/nonexistent/lut.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lut.txt"), "{err}");
    }
}
