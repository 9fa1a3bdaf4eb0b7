//! Binding-kinetics simulation for affinity benchmarking
//!
//! Simulates two-phase pseudo-first-order sensorgrams from (kon, koff)
//! rate constants, and ranks candidates against a benchmark through the
//! derived KD = koff/kon.

mod error;
mod simulate;
mod types;

pub use error::KineticsError;
pub use simulate::simulate;
pub use types::{KineticsParameters, Sensorgram, SensorgramSettings};
