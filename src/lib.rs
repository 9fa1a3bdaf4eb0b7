//! # assaykit
//!
//! Stateless numerical routines for quantitative bioassay analysis:
//!
//! - [`densitometry`] — lane-profile extraction, peak detection and
//!   integration, purity.
//! - [`calibration`] — log-linear ladder, linear and quadratic standard
//!   curves with inverse prediction.
//! - [`dose_response`] — four-parameter-logistic (4PL) fitting with
//!   quality notes.
//! - [`kinetics`] — two-phase binding sensorgram simulation and KD
//!   ranking.
//!
//! Every routine is a pure function of its inputs: no shared state, no
//! I/O, and identical inputs always produce identical results. Batch
//! parallelization across lanes, samples, or plates is the caller's
//! concern; nothing here serializes.

pub mod calibration;
pub mod densitometry;
pub mod dose_response;
pub mod error;
pub mod kinetics;

pub use error::AssayError;

pub mod prelude {
    pub use crate::calibration::{
        fit as fit_calibration, fit_ladder, match_ladder, CalibrationKind, CalibrationModel,
        CalibrationPoint,
    };
    pub use crate::densitometry::{
        analyze_lane, detect_peaks, integrate_peak, DensitometryOptions, LaneProfile, LaneResult,
        Peak,
    };
    pub use crate::dose_response::{
        fit as fit_dose_response, DoseResponseModel, DoseResponseStatus, FitOptions,
        FourParamLogistic, QualityOptions, ReplicateSet,
    };
    pub use crate::error::AssayError;
    pub use crate::kinetics::{simulate, KineticsParameters, Sensorgram, SensorgramSettings};
}
