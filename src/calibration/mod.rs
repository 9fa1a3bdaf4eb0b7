//! Calibration regression: ladders and standard curves
//!
//! One entry point, [`fit`], covers the three supported families:
//! log-linear molecular-weight ladders, and linear or quadratic
//! standard curves with inverse prediction for concentration read-back.
//!
//! # Usage
//!
//! ```rust,ignore
//! use assaykit::calibration::{fit, CalibrationKind, CalibrationPoint};
//!
//! let points = vec![
//!     CalibrationPoint::new(2000.0, 1.05),
//!     CalibrationPoint::new(1000.0, 0.55),
//!     CalibrationPoint::new(500.0, 0.30),
//! ];
//! let model = fit(&points, CalibrationKind::Linear)?;
//! let concentration = model.inverse(0.42)?;
//! ```

mod error;
mod fit;
mod types;

pub use error::CalibrationError;
pub use fit::{fit, fit_ladder, match_ladder};
pub use types::{CalibrationKind, CalibrationModel, CalibrationPoint};
