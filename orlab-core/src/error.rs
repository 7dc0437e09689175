//! Error types for the relaxation primitives.

use thiserror::Error;

/// Errors raised by the LP and knapsack primitives.
///
/// Infeasibility and unboundedness are not errors: they are reported
/// through [`SolveStatus`](crate::SolveStatus) and
/// [`KnapsackStatus`](crate::KnapsackStatus).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Problem data is unusable (non-finite values, empty objective).
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Vector or matrix lengths disagree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
