//! Dose-response error types

use thiserror::Error;

/// Input validation errors raised before any 4PL numerics run
///
/// A fit that starts but does not converge is not an error; it is the
/// `FitFailed` status on [`super::DoseResponseModel`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoseResponseError {
    /// Concentrations and responses differ in length
    #[error("length mismatch: {concentrations} concentrations vs {responses} responses")]
    LengthMismatch {
        concentrations: usize,
        responses: usize,
    },

    /// Fewer than four distinct concentration levels
    #[error("4PL fit needs at least 4 distinct concentration levels, got {n}")]
    InsufficientLevels { n: usize },

    /// A concentration is zero, negative, or not finite
    #[error("invalid concentration {value} at index {index}")]
    InvalidConcentration { index: usize, value: f64 },

    /// A response is not finite
    #[error("non-finite response at index {index}")]
    NonFiniteResponse { index: usize },
}
