//! Estimator error types.

use thiserror::Error;

/// Errors from estimate parameter validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimatorError {
    /// Test duration must be positive.
    #[error("Test duration must be a positive number of weeks")]
    InvalidDuration,

    /// MDE must be in (0, 100].
    #[error("Minimum detectable effect must be above 0 and at most 100 percent")]
    InvalidMde,

    /// Power must be in (0, 1].
    #[error("Statistical power must be above 0 and at most 1")]
    InvalidPower,

    /// Significance must be in (0, 1).
    #[error("Significance threshold must be strictly between 0 and 1")]
    InvalidSignificance,

    /// Budget cap multiplier must be positive.
    #[error("Budget cap multiplier must be positive")]
    InvalidMaxMultiplier,
}
