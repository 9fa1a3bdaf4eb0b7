//! Kinetics error types

use thiserror::Error;

/// Errors that can occur during sensorgram simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KineticsError {
    /// A rate constant, concentration, duration, or Rmax is invalid
    #[error("invalid kinetics parameter: {param} = {value}")]
    InvalidParameter { param: &'static str, value: f64 },

    /// The observed rate kon*conc + koff is zero, so no binding occurs
    /// and the model is undefined
    #[error("degenerate kinetics: kon*concentration + koff is zero")]
    DegenerateModel,
}
