//! Four-parameter-logistic dose-response fitting
//!
//! Fits response(x) = D + (A - D) / (1 + (x/C)^B) by nonlinear least
//! squares with data-derived seeding, and classifies fit quality with
//! advisory notes. A fit that does not converge is reported as the
//! [`DoseResponseModel::FitFailed`] status, not an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use assaykit::dose_response::{fit, FitOptions};
//!
//! let model = fit(&concentrations, &responses, &FitOptions::default())?;
//! if let Some(ec50) = model.ec50() {
//!     println!("EC50 = {:.2}", ec50);
//! }
//! ```

mod error;
mod fit;
mod model;
mod quality;
mod types;

pub use error::DoseResponseError;
pub use fit::fit;
pub use model::{DoseResponseModel, DoseResponseStatus, FourParamLogistic};
pub use quality::{assess, FitNote, QualityOptions};
pub use types::{mean_responses, FitOptions, ReplicateSet};
