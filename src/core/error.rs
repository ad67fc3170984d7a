//! Error types for the world-state engine

use thiserror::Error;

/// Result type for world-state operations
pub type WorldResult<T> = Result<T, WorldError>;

/// Failures surfaced by the engine and its I/O collaborators.
///
/// Coordinates never produce errors (they are clamped) and a duplicate tag
/// harvest is a negative outcome, not a failure.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Parameter vector from the swarm controller had the wrong length.
    #[error("malformed parameter vector: expected {expected} values, got {actual}")]
    MalformedParameterVector { expected: usize, actual: usize },

    /// Run log or snapshot file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<WorldError> for pyo3::PyErr {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::MalformedParameterVector { .. } | WorldError::Config(_) => {
                pyo3::exceptions::PyValueError::new_err(err.to_string())
            }
            WorldError::Io(_) => pyo3::exceptions::PyIOError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_vector_message_names_both_lengths() {
        let err = WorldError::MalformedParameterVector {
            expected: 9,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "malformed parameter vector: expected 9 values, got 4"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: WorldError = io.into();
        assert!(matches!(err, WorldError::Io(_)));
    }
}
