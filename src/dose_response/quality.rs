//! Advisory quality assessment for dose-response fits
//!
//! Notes flag a weak fit or noisy replicates; they never fail the fit.
//! Thresholds are caller policy with assay-typical defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::DoseResponseModel;
use super::types::ReplicateSet;

/// Thresholds for quality notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityOptions {
    /// Flag the fit when R-squared falls below this (default: 0.95)
    pub min_r_squared: f64,
    /// Flag a concentration level when its replicate CV exceeds this
    /// percentage (default: 15.0)
    pub max_cv_percent: f64,
}

impl Default for QualityOptions {
    fn default() -> Self {
        Self {
            min_r_squared: 0.95,
            max_cv_percent: 15.0,
        }
    }
}

/// Advisory notes attached to a fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FitNote {
    /// R-squared below the configured minimum
    LowFit { r_squared: f64, threshold: f64 },
    /// Replicate scatter at one concentration exceeds the CV threshold
    HighReplicateVariance {
        concentration: f64,
        cv_percent: f64,
        threshold: f64,
    },
    /// The fit did not converge, so no quality metrics apply
    NotFitted,
}

impl fmt::Display for FitNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitNote::LowFit {
                r_squared,
                threshold,
            } => {
                write!(f, "R²={:.4} below minimum {:.4}", r_squared, threshold)
            }
            FitNote::HighReplicateVariance {
                concentration,
                cv_percent,
                threshold,
            } => {
                write!(
                    f,
                    "CV {:.1}% at concentration {} exceeds {:.1}%",
                    cv_percent, concentration, threshold
                )
            }
            FitNote::NotFitted => write!(f, "fit did not converge"),
        }
    }
}

/// Assess a fit against replicate data
///
/// Returns every applicable note; an empty vector means the fit passed
/// all checks.
pub fn assess(
    model: &DoseResponseModel,
    replicates: &[ReplicateSet],
    options: &QualityOptions,
) -> Vec<FitNote> {
    let mut notes = Vec::new();

    match model {
        DoseResponseModel::FitFailed => notes.push(FitNote::NotFitted),
        DoseResponseModel::Fitted { .. } => {
            if let Some(r_squared) = model.r_squared() {
                if r_squared < options.min_r_squared {
                    notes.push(FitNote::LowFit {
                        r_squared,
                        threshold: options.min_r_squared,
                    });
                }
            }
        }
    }

    for set in replicates {
        let cv = set.cv_percent();
        if cv > options.max_cv_percent {
            notes.push(FitNote::HighReplicateVariance {
                concentration: set.concentration,
                cv_percent: cv,
                threshold: options.max_cv_percent,
            });
        }
    }

    notes
}
