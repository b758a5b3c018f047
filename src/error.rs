use std::fmt;

/// Unified error type for the whole pipeline.
///
/// Every variant is fatal at the point it occurs and propagates to `main`,
/// which maps it to a process exit code. No variant is ever defaulted away
/// (no NaN-filled tables, no partially written output).
#[derive(Clone, PartialEq)]
pub enum AppError {
    /// Configuration file unreadable, unparseable, or failed validation.
    Config(String),
    /// Filesystem or encoding failure outside configuration loading.
    Io(String),
    /// Sample-set shape errors (length mismatch, too few samples) and
    /// unmapped levels during table application.
    InvalidInput(String),
    /// The optimizer exhausted its iteration budget without converging.
    Convergence { iterations: usize, residual: f64 },
    /// A nominal output level falls outside the invertible range of the
    /// fitted model.
    Domain { value: f64, index: usize },
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Io(_) => 2,
            AppError::InvalidInput(_) => 3,
            AppError::Convergence { .. } => 4,
            AppError::Domain { .. } => 5,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "configuration error: {msg}"),
            AppError::Io(msg) => write!(f, "io error: {msg}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::Convergence { iterations, residual } => write!(
                f,
                "fitting did not converge after {iterations} iterations (final sum of squared residuals {residual:.6e})"
            ),
            AppError::Domain { value, index } => write!(
                f,
                "inversion error: nominal output {value} (index {index}) is outside the invertible range of the fitted model"
            ),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppError({self})")
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_stage() {
        let config = AppError::Config("missing field `nRows`".to_string());
        assert!(config.to_string().starts_with("configuration error"));

        let fit = AppError::Convergence { iterations: 100, residual: 12.5 };
        assert!(fit.to_string().contains("100 iterations"));

        let inv = AppError::Domain { value: 300.0, index: 7 };
        let msg = inv.to_string();
        assert!(msg.contains("300") && msg.contains("index 7"));
    }

    #[test]
    fn exit_codes_are_distinct_per_stage() {
        assert_eq!(AppError::Config(String::new()).exit_code(), 2);
        assert_eq!(AppError::InvalidInput(String::new()).exit_code(), 3);
        assert_eq!(
            AppError::Convergence { iterations: 1, residual: 0.0 }.exit_code(),
            4
        );
        assert_eq!(AppError::Domain { value: 0.0, index: 0 }.exit_code(), 5);
    }
}
