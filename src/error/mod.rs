use thiserror::Error;

use crate::calibration::CalibrationError;
use crate::densitometry::DensitometryError;
use crate::dose_response::DoseResponseError;
use crate::kinetics::KineticsError;

/// Crate-level error aggregating the per-component failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssayError {
    #[error("densitometry error: {0}")]
    Densitometry(#[from] DensitometryError),

    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("dose-response error: {0}")]
    DoseResponse(#[from] DoseResponseError),

    #[error("kinetics error: {0}")]
    Kinetics(#[from] KineticsError),
}
