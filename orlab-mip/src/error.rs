//! Error types for the relaxation engines.

use orlab_core::CoreError;
use thiserror::Error;

/// Errors that can occur while running an engine.
///
/// Infeasible relaxations, exhausted budgets and degenerate pricing are
/// outcomes, not errors; they are reported through the engine's status and
/// log. An `Err` means the input or a primitive's response was unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MipError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// A primitive reported success but returned an unusable answer
    #[error("Malformed relaxation response: {0}")]
    MalformedRelaxation(String),

    /// Primitive rejected its input
    #[error("Relaxation primitive error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for engine operations.
pub type MipResult<T> = Result<T, MipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_conversion() {
        let err: MipError = CoreError::DimensionMismatch("bad".to_string()).into();
        assert!(matches!(err, MipError::Core(_)));
        assert_eq!(
            err.to_string(),
            "Relaxation primitive error: Dimension mismatch: bad"
        );
    }
}
