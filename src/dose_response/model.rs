//! The four-parameter logistic model and fit outcome

use serde::{Deserialize, Serialize};

/// Four-parameter logistic (4PL) coefficients
///
/// response(x) = top + (bottom - top) / (1 + (x / ec50)^hill_slope)
///
/// `bottom` and `top` are the lower and upper asymptotes, `ec50` the
/// inflection concentration, and `hill_slope` the steepness at the
/// inflection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourParamLogistic {
    pub bottom: f64,
    pub hill_slope: f64,
    pub ec50: f64,
    pub top: f64,
}

impl FourParamLogistic {
    /// Predicted response at concentration `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.top + (self.bottom - self.top) / (1.0 + (x / self.ec50).powf(self.hill_slope))
    }
}

/// Coarse fit status, mirroring the two arms of [`DoseResponseModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoseResponseStatus {
    Fitted,
    FitFailed,
}

/// Outcome of a 4PL fit
///
/// A failed fit is an expected, displayable result (insufficient dynamic
/// range, optimizer divergence), so it is carried as a variant rather
/// than an error. Coefficients exist only in the `Fitted` arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DoseResponseModel {
    Fitted {
        params: FourParamLogistic,
        /// `None` when all responses are equal (SStot = 0)
        r_squared: Option<f64>,
    },
    FitFailed,
}

impl DoseResponseModel {
    pub fn status(&self) -> DoseResponseStatus {
        match self {
            DoseResponseModel::Fitted { .. } => DoseResponseStatus::Fitted,
            DoseResponseModel::FitFailed => DoseResponseStatus::FitFailed,
        }
    }

    /// Fitted coefficients, if the fit converged
    pub fn params(&self) -> Option<&FourParamLogistic> {
        match self {
            DoseResponseModel::Fitted { params, .. } => Some(params),
            DoseResponseModel::FitFailed => None,
        }
    }

    /// EC50, meaningful only for a converged fit
    pub fn ec50(&self) -> Option<f64> {
        self.params().map(|p| p.ec50)
    }

    pub fn r_squared(&self) -> Option<f64> {
        match self {
            DoseResponseModel::Fitted { r_squared, .. } => *r_squared,
            DoseResponseModel::FitFailed => None,
        }
    }

    /// Predicted response at `x`, if the fit converged
    pub fn predict(&self, x: f64) -> Option<f64> {
        self.params().map(|p| p.predict(x))
    }
}
