//! Peak detection, integration, and lane-level summary
//!
//! Detection follows the usual prominence-based scheme: a sample is a
//! peak when it is a strict local maximum whose prominence (height above
//! the lowest contour separating it from higher terrain on either side)
//! clears a threshold, and whose base width at half prominence clears a
//! second threshold. Integration sums the profile over a window scaled
//! from the detected width.

use ndarray::ArrayView2;

use super::error::DensitometryError;
use super::profile::LaneProfile;
use super::types::{DensitometryOptions, LaneResult, Peak, PeakCandidate};

/// Detect peaks in a profile
///
/// Returns candidates in ascending position order. Plateaus report the
/// leftmost sample. An empty result is a valid outcome, not an error.
pub fn detect_peaks(
    profile: &LaneProfile,
    min_prominence: f64,
    min_width: f64,
) -> Vec<PeakCandidate> {
    let v = profile.intensities();
    let mut candidates = Vec::new();

    for position in local_maxima(v) {
        let (prominence, left_base, right_base) = peak_prominence(v, position);
        if prominence < min_prominence {
            continue;
        }

        let width = peak_width(v, position, prominence, left_base, right_base);
        if width < min_width {
            continue;
        }

        candidates.push(PeakCandidate {
            position,
            height: v[position],
            prominence,
            width,
        });
    }

    candidates
}

/// Find indices of strict local maxima (leftmost sample of a plateau)
fn local_maxima(v: &[f64]) -> Vec<usize> {
    let n = v.len();
    let mut maxima = Vec::new();

    let mut i = 1;
    while n >= 3 && i + 1 < n {
        if v[i] > v[i - 1] {
            // Scan across a possible plateau
            let mut j = i;
            while j + 1 < n && v[j + 1] == v[i] {
                j += 1;
            }
            if j + 1 < n && v[j + 1] < v[i] {
                maxima.push(i);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    maxima
}

/// Prominence of the peak at `position`, plus its left and right base
/// indices (the minima bounding the peak on each side)
fn peak_prominence(v: &[f64], position: usize) -> (f64, usize, usize) {
    let height = v[position];

    // Walk left until higher terrain or the edge; track the minimum
    let mut left_min = height;
    let mut left_base = position;
    let mut i = position;
    while i > 0 {
        i -= 1;
        if v[i] > height {
            break;
        }
        if v[i] < left_min {
            left_min = v[i];
            left_base = i;
        }
    }

    // Same to the right
    let mut right_min = height;
    let mut right_base = position;
    let mut j = position;
    while j + 1 < v.len() {
        j += 1;
        if v[j] > height {
            break;
        }
        if v[j] < right_min {
            right_min = v[j];
            right_base = j;
        }
    }

    (height - left_min.max(right_min), left_base, right_base)
}

/// Base width at half prominence, with sub-sample interpolation at the
/// crossing points
fn peak_width(
    v: &[f64],
    position: usize,
    prominence: f64,
    left_base: usize,
    right_base: usize,
) -> f64 {
    let threshold = v[position] - prominence / 2.0;

    // Left crossing
    let mut i = position;
    while i > left_base && v[i - 1] >= threshold {
        i -= 1;
    }
    let left_ip = if i > left_base && v[i - 1] < threshold {
        // Interpolate between i-1 (below) and i (at or above)
        (i - 1) as f64 + (threshold - v[i - 1]) / (v[i] - v[i - 1])
    } else {
        i as f64
    };

    // Right crossing
    let mut j = position;
    while j < right_base && v[j + 1] >= threshold {
        j += 1;
    }
    let right_ip = if j < right_base && v[j + 1] < threshold {
        j as f64 + (v[j] - threshold) / (v[j] - v[j + 1])
    } else {
        j as f64
    };

    right_ip - left_ip
}

/// Integrate a detected peak over a window scaled from its width
///
/// The window spans `position ± width * reach`, clamped to the profile.
/// IOD is the plain sum of intensities over the inclusive window.
///
/// # Errors
/// Returns [`DensitometryError::PositionOutOfBounds`] if the candidate
/// does not belong to this profile.
pub fn integrate_peak(
    profile: &LaneProfile,
    candidate: &PeakCandidate,
    reach: f64,
) -> Result<Peak, DensitometryError> {
    let v = profile.intensities();
    if candidate.position >= v.len() {
        return Err(DensitometryError::PositionOutOfBounds {
            position: candidate.position,
            len: v.len(),
        });
    }

    let half_window = candidate.width * reach;
    let window_start = ((candidate.position as f64 - half_window).floor().max(0.0)) as usize;
    let window_end =
        (((candidate.position as f64 + half_window).floor()) as usize).min(v.len() - 1);

    let integrated_density: f64 = v[window_start..=window_end].iter().sum();

    Ok(Peak {
        position: candidate.position,
        height: candidate.height,
        prominence: candidate.prominence,
        width: candidate.width,
        window_start,
        window_end,
        integrated_density,
    })
}

/// Summarize a lane from its profile and integrated peaks
///
/// The main peak is the one with the largest IOD; on equal IOD the lower
/// position index wins. Purity is the main peak's share of the total IOD
/// in percent, or 0 when no peaks were found (or the total is zero).
pub fn compute_lane_result(profile: LaneProfile, peaks: Vec<Peak>) -> LaneResult {
    let mut main_peak_idx: Option<usize> = None;
    for (i, peak) in peaks.iter().enumerate() {
        match main_peak_idx {
            None => main_peak_idx = Some(i),
            Some(best) => {
                if peak.integrated_density > peaks[best].integrated_density {
                    main_peak_idx = Some(i);
                }
            }
        }
    }

    let total: f64 = peaks.iter().map(|p| p.integrated_density).sum();
    let purity = match main_peak_idx {
        Some(best) if total > 0.0 => peaks[best].integrated_density / total * 100.0,
        _ => 0.0,
    };

    LaneResult {
        profile,
        peaks,
        main_peak_idx,
        purity,
    }
}

/// Run the full lane pipeline: extract, subtract background, detect,
/// integrate, and summarize
pub fn analyze_lane(
    roi: ArrayView2<'_, f64>,
    options: &DensitometryOptions,
) -> Result<LaneResult, DensitometryError> {
    let profile = LaneProfile::from_roi(roi)?.subtract_background(options.subtract_background);

    let candidates = detect_peaks(&profile, options.min_prominence, options.min_width);
    let peaks = candidates
        .iter()
        .map(|c| integrate_peak(&profile, c, options.integration_reach))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compute_lane_result(profile, peaks))
}
