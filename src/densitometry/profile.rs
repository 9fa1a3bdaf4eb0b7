//! Lane profile extraction and background subtraction
//!
//! A lane ROI arrives as a 2-D intensity matrix with rows along the
//! migration direction and columns across the lane width. The caller is
//! expected to have inverted grayscale already, so intensity grows with
//! band darkness. Collapsing the ROI across its width yields the 1-D
//! profile that peak detection operates on.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::error::DensitometryError;

/// A 1-D intensity profile along the migration axis
///
/// Immutable once constructed; background subtraction returns a new
/// profile rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneProfile {
    intensities: Vec<f64>,
}

impl LaneProfile {
    /// Build a profile by averaging a ROI across its width (columns)
    ///
    /// # Errors
    /// Returns [`DensitometryError::EmptyRoi`] for a zero-area ROI and
    /// [`DensitometryError::InvalidIntensity`] if any value is negative
    /// or not finite.
    pub fn from_roi(roi: ArrayView2<'_, f64>) -> Result<Self, DensitometryError> {
        let (rows, cols) = roi.dim();
        if rows == 0 || cols == 0 {
            return Err(DensitometryError::EmptyRoi { rows, cols });
        }

        for ((row, col), &value) in roi.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(DensitometryError::InvalidIntensity { row, col, value });
            }
        }

        let intensities = roi
            .rows()
            .into_iter()
            .map(|row| row.sum() / cols as f64)
            .collect();

        Ok(Self { intensities })
    }

    /// Build a profile directly from an intensity vector
    ///
    /// # Errors
    /// Returns [`DensitometryError::EmptyRoi`] for an empty vector and
    /// [`DensitometryError::InvalidIntensity`] for negative or non-finite
    /// values.
    pub fn from_intensities(intensities: Vec<f64>) -> Result<Self, DensitometryError> {
        if intensities.is_empty() {
            return Err(DensitometryError::EmptyRoi { rows: 0, cols: 0 });
        }
        for (row, &value) in intensities.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(DensitometryError::InvalidIntensity { row, col: 0, value });
            }
        }
        Ok(Self { intensities })
    }

    /// Intensity samples, ordered by migration position
    #[inline]
    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// True when the profile holds no samples (never for a constructed
    /// profile, but keeps the len/is_empty pair complete)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// Background level: the 10th percentile of the profile
    ///
    /// A low quantile is robust against a few bright background pixels,
    /// unlike a mean-based estimate.
    pub fn background_level(&self) -> f64 {
        percentile(&self.intensities, 10.0)
    }

    /// Subtract the background level, clamping at zero
    ///
    /// When `enabled` is false the profile is returned unchanged.
    pub fn subtract_background(&self, enabled: bool) -> LaneProfile {
        if !enabled {
            return self.clone();
        }
        let bg = self.background_level();
        LaneProfile {
            intensities: self
                .intensities
                .iter()
                .map(|&v| (v - bg).max(0.0))
                .collect(),
        }
    }
}

/// Linear-interpolated percentile over an unsorted slice
///
/// Matches numpy's default "linear" interpolation: the p-th percentile
/// sits at rank p/100 * (n - 1) of the sorted values.
fn percentile(values: &[f64], p: f64) -> f64 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
