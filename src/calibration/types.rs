//! Calibration types: points, model kinds, and fitted models

use serde::{Deserialize, Serialize};

use super::error::CalibrationError;

/// A single calibration observation
///
/// `independent` is a migration position (ladder fits) or a known
/// concentration (standard curves); `dependent` is the reference value
/// or measured response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub independent: f64,
    pub dependent: f64,
}

impl CalibrationPoint {
    pub fn new(independent: f64, dependent: f64) -> Self {
        Self {
            independent,
            dependent,
        }
    }
}

/// The closed set of supported calibration model families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationKind {
    /// log10(dependent) = slope * independent + intercept
    /// (molecular-weight ladders)
    LogLinear,
    /// dependent = slope * independent + intercept
    Linear,
    /// dependent = a * independent^2 + b * independent + c
    Quadratic,
}

/// A fitted calibration model
///
/// Created once per fit and never mutated. `r_squared` is `None` when
/// the coefficient of determination is undefined (all dependents equal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalibrationModel {
    LogLinear {
        slope: f64,
        intercept: f64,
        r_squared: Option<f64>,
    },
    Linear {
        slope: f64,
        intercept: f64,
        r_squared: Option<f64>,
    },
    Quadratic {
        a: f64,
        b: f64,
        c: f64,
        r_squared: Option<f64>,
    },
}

impl CalibrationModel {
    /// The model family this fit belongs to
    pub fn kind(&self) -> CalibrationKind {
        match self {
            CalibrationModel::LogLinear { .. } => CalibrationKind::LogLinear,
            CalibrationModel::Linear { .. } => CalibrationKind::Linear,
            CalibrationModel::Quadratic { .. } => CalibrationKind::Quadratic,
        }
    }

    /// Coefficient of determination, if defined
    pub fn r_squared(&self) -> Option<f64> {
        match *self {
            CalibrationModel::LogLinear { r_squared, .. }
            | CalibrationModel::Linear { r_squared, .. }
            | CalibrationModel::Quadratic { r_squared, .. } => r_squared,
        }
    }

    /// Forward prediction: independent -> dependent
    ///
    /// For log-linear ladders this is position -> molecular weight,
    /// i.e. `10^(slope * x + intercept)`.
    pub fn predict(&self, x: f64) -> f64 {
        match *self {
            CalibrationModel::LogLinear { slope, intercept, .. } => {
                10f64.powf(slope * x + intercept)
            }
            CalibrationModel::Linear { slope, intercept, .. } => slope * x + intercept,
            CalibrationModel::Quadratic { a, b, c, .. } => a * x * x + b * x + c,
        }
    }

    /// Inverse prediction: dependent -> independent
    ///
    /// `Ok(None)` marks a per-value out-of-range outcome (quadratic
    /// response beyond the calibrated range); it is not a model failure.
    /// Negative results are returned as-is; clamping to zero is a
    /// call-site convention.
    ///
    /// # Errors
    /// [`CalibrationError::DegenerateModel`] for a zero-slope linear
    /// model (or an all-zero quadratic), and
    /// [`CalibrationError::InverseUnsupported`] for log-linear ladders.
    pub fn inverse(&self, y: f64) -> Result<Option<f64>, CalibrationError> {
        match *self {
            CalibrationModel::LogLinear { .. } => Err(CalibrationError::InverseUnsupported {
                kind: CalibrationKind::LogLinear,
            }),
            CalibrationModel::Linear { slope, intercept, .. } => {
                if slope == 0.0 {
                    return Err(CalibrationError::DegenerateModel {
                        kind: CalibrationKind::Linear,
                        reason: "slope is zero",
                    });
                }
                Ok(Some((y - intercept) / slope))
            }
            CalibrationModel::Quadratic { a, b, c, .. } => quadratic_inverse(a, b, c, y),
        }
    }
}

/// Solve a*x^2 + b*x + (c - y) = 0 for the assay-meaningful root
///
/// Negative discriminant means the response lies outside the calibrated
/// range: `Ok(None)`. Of two real roots, the non-negative one is chosen;
/// when both are non-negative the smaller wins (standard curves rise
/// then saturate, so the lower branch is the physical one).
fn quadratic_inverse(a: f64, b: f64, c: f64, y: f64) -> Result<Option<f64>, CalibrationError> {
    if a == 0.0 {
        if b == 0.0 {
            return Err(CalibrationError::DegenerateModel {
                kind: CalibrationKind::Quadratic,
                reason: "both quadratic and linear coefficients are zero",
            });
        }
        return Ok(Some((y - c) / b));
    }

    let discriminant = b * b - 4.0 * a * (c - y);
    if discriminant < 0.0 {
        return Ok(None);
    }

    let sqrt_d = discriminant.sqrt();
    let root1 = (-b + sqrt_d) / (2.0 * a);
    let root2 = (-b - sqrt_d) / (2.0 * a);

    let chosen = match (root1 >= 0.0, root2 >= 0.0) {
        (true, true) => root1.min(root2),
        (true, false) => root1,
        (false, true) => root2,
        (false, false) => root1.max(root2),
    };

    Ok(Some(chosen))
}
