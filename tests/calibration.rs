//! Calibration workflows: ladders and standard-curve read-back

use approx::assert_relative_eq;
use assaykit::calibration::{fit, fit_ladder, CalibrationError, CalibrationKind, CalibrationPoint};
use assaykit::AssayError;

#[test]
fn ladder_pipeline_recovers_known_weights() {
    // Positions generated from log10(mw) = -0.008 * pos + 2.6
    let weights = [250.0, 150.0, 100.0, 75.0, 50.0, 37.0, 25.0];
    let positions: Vec<f64> = weights
        .iter()
        .map(|mw: &f64| (2.6 - mw.log10()) / 0.008)
        .collect();

    let model = fit_ladder(&positions, &weights).unwrap();
    assert!(model.r_squared().unwrap() > 0.999);

    for (&pos, &mw) in positions.iter().zip(weights.iter()) {
        assert_relative_eq!(model.predict(pos), mw, max_relative = 0.01);
    }

    // Ladders calibrate position -> weight only; the reverse read is a
    // caller responsibility and is refused
    assert!(matches!(
        model.inverse(100.0),
        Err(CalibrationError::InverseUnsupported { .. })
    ));
}

#[test]
fn linear_standard_curve_reads_back_unknowns() {
    let concentrations = [2000.0, 1000.0, 500.0, 250.0, 125.0, 62.5, 31.25, 0.0];
    let points: Vec<CalibrationPoint> = concentrations
        .iter()
        .map(|&c| CalibrationPoint::new(c, 0.0005 * c + 0.05))
        .collect();

    let model = fit(&points, CalibrationKind::Linear).unwrap();
    assert_relative_eq!(model.r_squared().unwrap(), 1.0, epsilon = 1e-6);

    // An unknown sample's response maps back to its concentration
    let unknown = 400.0;
    let response = model.predict(unknown);
    let read_back = model.inverse(response).unwrap().unwrap();
    assert_relative_eq!(read_back, unknown, epsilon = 1e-6);
}

#[test]
fn quadratic_standard_curve_round_trip_and_saturation() {
    // Rises toward a plateau: vertex near x = 2250, above the standards
    let (a, b, c) = (-2e-7, 9e-4, 0.02);
    let points: Vec<CalibrationPoint> = [0.0, 250.0, 500.0, 750.0, 1000.0, 1500.0, 2000.0]
        .iter()
        .map(|&x| CalibrationPoint::new(x, a * x * x + b * x + c))
        .collect();

    let model = fit(&points, CalibrationKind::Quadratic).unwrap();
    assert_relative_eq!(model.r_squared().unwrap(), 1.0, epsilon = 1e-9);

    // Round trip picks the lower branch of the parabola
    for &x in &[100.0, 500.0, 1200.0, 1900.0] {
        let read_back = model.inverse(model.predict(x)).unwrap().unwrap();
        assert_relative_eq!(read_back, x, max_relative = 1e-6);
    }

    // A response above the curve's maximum has no real solution
    assert!(model.inverse(2.0).unwrap().is_none());
}

#[test]
fn calibration_errors_convert_to_crate_error() {
    let too_few = vec![CalibrationPoint::new(1.0, 2.0)];
    let err = fit(&too_few, CalibrationKind::Linear).unwrap_err();

    let crate_err: AssayError = err.into();
    assert!(matches!(
        crate_err,
        AssayError::Calibration(CalibrationError::InsufficientPoints { .. })
    ));
}
