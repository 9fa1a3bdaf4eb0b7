//! Densitometry types: peaks, lane results, and analysis options

use serde::{Deserialize, Serialize};

use super::profile::LaneProfile;

/// A local maximum found by peak detection, before integration
///
/// `width` is the estimated base width measured at half prominence,
/// in profile samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeakCandidate {
    /// Sample index of the maximum along the migration axis
    pub position: usize,
    /// Profile intensity at the maximum
    pub height: f64,
    /// Height above the lowest contour line separating this peak
    /// from higher terrain
    pub prominence: f64,
    /// Estimated base width at half prominence
    pub width: f64,
}

/// An integrated peak with its summation window
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Peak {
    /// Sample index of the maximum
    pub position: usize,
    /// Profile intensity at the maximum
    pub height: f64,
    /// Prominence carried over from detection
    pub prominence: f64,
    /// Base width carried over from detection
    pub width: f64,
    /// First sample of the integration window (inclusive)
    pub window_start: usize,
    /// Last sample of the integration window (inclusive)
    pub window_end: usize,
    /// Integrated optical density: sum of intensities over the window
    pub integrated_density: f64,
}

/// Complete analysis of a single lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneResult {
    /// The (optionally background-subtracted) profile that was analyzed
    pub profile: LaneProfile,
    /// Integrated peaks, ascending by position
    pub peaks: Vec<Peak>,
    /// Index into `peaks` of the peak with the largest IOD.
    /// Ties are broken by the lower position index. `None` iff `peaks`
    /// is empty.
    pub main_peak_idx: Option<usize>,
    /// 100 x mainPeak.IOD / sum of all peak IODs, in [0, 100].
    /// 0 when no peaks were found.
    pub purity: f64,
}

impl LaneResult {
    /// The main peak, if any peaks were detected
    #[inline]
    pub fn main_peak(&self) -> Option<&Peak> {
        self.main_peak_idx.map(|i| &self.peaks[i])
    }

    /// Sum of integrated densities over all peaks
    pub fn total_integrated_density(&self) -> f64 {
        self.peaks.iter().map(|p| p.integrated_density).sum()
    }
}

/// Options controlling lane analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensitometryOptions {
    /// Subtract the 10th-percentile background level (default: true)
    pub subtract_background: bool,
    /// Minimum prominence for a local maximum to count as a peak
    /// (default: 10.0)
    pub min_prominence: f64,
    /// Minimum base width in samples (default: 5.0)
    pub min_width: f64,
    /// Scale factor applied to a peak's half-width when building the
    /// integration window (default: 0.6)
    pub integration_reach: f64,
}

impl Default for DensitometryOptions {
    fn default() -> Self {
        Self {
            subtract_background: true,
            min_prominence: 10.0,
            min_width: 5.0,
            integration_reach: 0.6,
        }
    }
}

impl DensitometryOptions {
    /// Enable or disable background subtraction
    pub fn with_subtract_background(mut self, enabled: bool) -> Self {
        self.subtract_background = enabled;
        self
    }

    /// Set the minimum peak prominence
    pub fn with_min_prominence(mut self, prominence: f64) -> Self {
        self.min_prominence = prominence;
        self
    }

    /// Set the minimum peak width
    pub fn with_min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    /// Set the integration reach
    pub fn with_integration_reach(mut self, reach: f64) -> Self {
        self.integration_reach = reach;
        self
    }
}
