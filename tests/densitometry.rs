//! End-to-end lane analysis on synthetic gel images

use approx::assert_relative_eq;
use assaykit::densitometry::{analyze_lane, DensitometryOptions, LaneResult};
use ndarray::Array2;

/// Build a lane ROI (rows = migration axis, cols = lane width) from a
/// set of Gaussian bands over a flat background
fn synthetic_lane(len: usize, width: usize, bands: &[(f64, f64, f64)], background: f64) -> Array2<f64> {
    Array2::from_shape_fn((len, width), |(i, _)| {
        let signal: f64 = bands
            .iter()
            .map(|&(center, height, sigma)| {
                let d = i as f64 - center;
                height * (-d * d / (2.0 * sigma * sigma)).exp()
            })
            .sum();
        background + signal
    })
}

#[test]
fn two_band_lane_main_peak_and_purity() {
    // Strong band at 60, weaker degradation band at 140
    let roi = synthetic_lane(200, 8, &[(60.0, 200.0, 6.0), (140.0, 80.0, 6.0)], 5.0);
    let result = analyze_lane(roi.view(), &DensitometryOptions::default()).unwrap();

    assert_eq!(result.peaks.len(), 2);
    assert_eq!(result.peaks[0].position, 60);
    assert_eq!(result.peaks[1].position, 140);

    let main = result.main_peak().expect("two peaks were detected");
    assert_eq!(main.position, 60);

    // Main band carries most of the signal but not all of it
    assert!(result.purity > 50.0 && result.purity < 100.0);
    assert_relative_eq!(
        result.purity,
        main.integrated_density / result.total_integrated_density() * 100.0,
        epsilon = 1e-12
    );
}

#[test]
fn single_band_lane_is_pure() {
    let roi = synthetic_lane(200, 8, &[(100.0, 150.0, 6.0)], 2.0);
    let result = analyze_lane(roi.view(), &DensitometryOptions::default()).unwrap();

    assert_eq!(result.peaks.len(), 1);
    assert_relative_eq!(result.purity, 100.0);
}

#[test]
fn background_subtraction_lowers_integrated_density() {
    let roi = synthetic_lane(200, 8, &[(100.0, 150.0, 6.0)], 20.0);

    let with = analyze_lane(roi.view(), &DensitometryOptions::default()).unwrap();
    let without = analyze_lane(
        roi.view(),
        &DensitometryOptions::default().with_subtract_background(false),
    )
    .unwrap();

    assert_eq!(with.peaks.len(), 1);
    assert_eq!(without.peaks.len(), 1);
    assert!(
        with.total_integrated_density() < without.total_integrated_density(),
        "net IOD should drop once the pedestal is removed"
    );
}

#[test]
fn faint_bands_below_prominence_are_ignored() {
    // The 4-unit bump sits below the default prominence threshold of 10
    let roi = synthetic_lane(200, 8, &[(60.0, 200.0, 6.0), (150.0, 4.0, 6.0)], 0.0);
    let result = analyze_lane(roi.view(), &DensitometryOptions::default()).unwrap();

    assert_eq!(result.peaks.len(), 1);
    assert_eq!(result.peaks[0].position, 60);

    // Lowering the threshold recovers the faint band
    let sensitive = analyze_lane(
        roi.view(),
        &DensitometryOptions::default().with_min_prominence(1.0),
    )
    .unwrap();
    assert_eq!(sensitive.peaks.len(), 2);
}

#[test]
fn lane_result_serializes_round_trip() {
    let roi = synthetic_lane(120, 4, &[(50.0, 100.0, 5.0)], 1.0);
    let result = analyze_lane(roi.view(), &DensitometryOptions::default()).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: LaneResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back.peaks.len(), result.peaks.len());
    assert_eq!(back.main_peak_idx, result.main_peak_idx);
    assert_relative_eq!(back.purity, result.purity);
    assert_relative_eq!(
        back.total_integrated_density(),
        result.total_integrated_density()
    );
}
