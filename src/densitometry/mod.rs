//! Lane densitometry: profile extraction, peak detection, and purity
//!
//! Converts a 2-D lane ROI into a 1-D intensity profile, finds and
//! integrates bands, and summarizes each lane as a [`LaneResult`] with
//! a main peak and purity percentage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use assaykit::densitometry::{analyze_lane, DensitometryOptions};
//!
//! let options = DensitometryOptions::default().with_min_prominence(5.0);
//! let result = analyze_lane(roi.view(), &options)?;
//!
//! if let Some(main) = result.main_peak() {
//!     println!("IOD {:.0}, purity {:.1}%", main.integrated_density, result.purity);
//! }
//! ```

mod error;
mod peaks;
mod profile;
mod types;

pub use error::DensitometryError;
pub use peaks::{analyze_lane, compute_lane_result, detect_peaks, integrate_peak};
pub use profile::LaneProfile;
pub use types::{DensitometryOptions, LaneResult, Peak, PeakCandidate};
