//! Calibration error types

use thiserror::Error;

use super::types::CalibrationKind;

/// Errors that can occur when fitting or inverting a calibration model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Too few points for the requested model
    #[error("{kind:?} fit needs at least {required} points, got {n}")]
    InsufficientPoints {
        kind: CalibrationKind,
        n: usize,
        required: usize,
    },

    /// A log-linear fit saw a dependent value that cannot be logged
    #[error("log-linear fit requires positive dependents, got {value}")]
    NonPositiveDependent { value: f64 },

    /// The fitted model has no usable inverse or forward solution
    #[error("degenerate {kind:?} model: {reason}")]
    DegenerateModel {
        kind: CalibrationKind,
        reason: &'static str,
    },

    /// Inverse prediction is not defined for this model kind
    #[error("inverse prediction is not supported for {kind:?} models")]
    InverseUnsupported { kind: CalibrationKind },
}
