//! Kinetics types: rate constants, simulation settings, and sensorgrams

use serde::{Deserialize, Serialize};

/// Pseudo-first-order binding rate constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticsParameters {
    /// Association rate constant, 1/(M*s)
    pub kon: f64,
    /// Dissociation rate constant, 1/s
    pub koff: f64,
}

impl KineticsParameters {
    pub fn new(kon: f64, koff: f64) -> Self {
        Self { kon, koff }
    }

    /// Equilibrium dissociation constant KD = koff/kon, in M.
    /// Lower KD means tighter binding. Infinite when `kon` is zero.
    #[inline]
    pub fn kd(&self) -> f64 {
        self.koff / self.kon
    }

    /// Fold improvement over a benchmark: benchmark KD / this KD.
    /// Greater than 1 means this candidate binds tighter. `None` when
    /// either KD is degenerate (zero or infinite), since no finite fold
    /// ranks such a pair.
    pub fn fold_vs(&self, benchmark: &KineticsParameters) -> Option<f64> {
        let (own, reference) = (self.kd(), benchmark.kd());
        if !own.is_finite() || own <= 0.0 || !reference.is_finite() || reference <= 0.0 {
            return None;
        }
        Some(reference / own)
    }
}

/// Settings for a two-phase sensorgram simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorgramSettings {
    /// Analyte concentration in M (default: 10 nM)
    pub analyte_concentration: f64,
    /// Association phase duration in seconds (default: 180)
    pub association_duration: f64,
    /// Dissociation phase duration in seconds (default: 600)
    pub dissociation_duration: f64,
    /// Maximal binding capacity in response units (default: 100)
    pub rmax: f64,
    /// Samples across the association phase (default: 100)
    pub association_samples: usize,
    /// Samples across the dissociation phase (default: 200)
    pub dissociation_samples: usize,
}

impl Default for SensorgramSettings {
    fn default() -> Self {
        Self {
            analyte_concentration: 10e-9,
            association_duration: 180.0,
            dissociation_duration: 600.0,
            rmax: 100.0,
            association_samples: 100,
            dissociation_samples: 200,
        }
    }
}

impl SensorgramSettings {
    /// Set the analyte concentration in M
    pub fn with_analyte_concentration(mut self, concentration: f64) -> Self {
        self.analyte_concentration = concentration;
        self
    }

    /// Set the phase durations in seconds
    pub fn with_durations(mut self, association: f64, dissociation: f64) -> Self {
        self.association_duration = association;
        self.dissociation_duration = dissociation;
        self
    }

    /// Set the maximal binding capacity
    pub fn with_rmax(mut self, rmax: f64) -> Self {
        self.rmax = rmax;
        self
    }
}

/// A simulated two-phase sensorgram
///
/// Times are absolute: the dissociation segment continues after the
/// association phase ends. The first dissociation sample repeats the
/// final association response, so the curve is continuous at the
/// junction by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensorgram {
    /// Sample times in seconds, ascending across both phases
    pub times: Vec<f64>,
    /// Response at each sample time
    pub responses: Vec<f64>,
    /// Number of samples belonging to the association phase
    pub association_len: usize,
}

impl Sensorgram {
    /// (time, response) samples of the association phase
    pub fn association(&self) -> (&[f64], &[f64]) {
        (
            &self.times[..self.association_len],
            &self.responses[..self.association_len],
        )
    }

    /// (time, response) samples of the dissociation phase
    pub fn dissociation(&self) -> (&[f64], &[f64]) {
        (
            &self.times[self.association_len..],
            &self.responses[self.association_len..],
        )
    }

    /// Response at the end of the association phase
    pub fn final_association_response(&self) -> f64 {
        self.responses[self.association_len - 1]
    }
}
