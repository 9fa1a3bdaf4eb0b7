//! Fit options and replicate-table types

use serde::{Deserialize, Serialize};

use super::model::FourParamLogistic;

/// Options controlling the 4PL optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOptions {
    /// Iteration budget for the local optimizer (default: 10_000)
    pub max_iterations: u64,
    /// Simplex standard-deviation tolerance for convergence
    /// (default: 1e-10)
    pub sd_tolerance: f64,
    /// Override the data-derived starting point. When `None`, seeds are
    /// bottom = min(responses), top = max(responses),
    /// ec50 = median(concentrations), hill_slope = 1.0.
    pub seeds: Option<FourParamLogistic>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            sd_tolerance: 1e-10,
            seeds: None,
        }
    }
}

impl FitOptions {
    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Override the starting point
    pub fn with_seeds(mut self, seeds: FourParamLogistic) -> Self {
        self.seeds = Some(seeds);
        self
    }
}

/// Replicate responses measured at one concentration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateSet {
    pub concentration: f64,
    pub responses: Vec<f64>,
}

impl ReplicateSet {
    pub fn new(concentration: f64, responses: Vec<f64>) -> Self {
        Self {
            concentration,
            responses,
        }
    }

    /// Mean of the replicate responses
    pub fn mean_response(&self) -> f64 {
        if self.responses.is_empty() {
            return f64::NAN;
        }
        self.responses.iter().sum::<f64>() / self.responses.len() as f64
    }

    /// Coefficient of variation in percent, on the raw responses
    ///
    /// Uses the sample standard deviation (n - 1). Returns 0 for fewer
    /// than two replicates or a zero mean.
    pub fn cv_percent(&self) -> f64 {
        let n = self.responses.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean_response();
        if mean == 0.0 {
            return 0.0;
        }
        let var = self
            .responses
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        var.sqrt() / mean.abs() * 100.0
    }
}

/// Collapse a replicate table into parallel (concentration, mean) arrays
/// ready for fitting
pub fn mean_responses(replicates: &[ReplicateSet]) -> (Vec<f64>, Vec<f64>) {
    let concentrations = replicates.iter().map(|r| r.concentration).collect();
    let means = replicates.iter().map(|r| r.mean_response()).collect();
    (concentrations, means)
}
