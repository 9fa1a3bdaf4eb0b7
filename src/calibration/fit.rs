//! Least-squares fitting for the calibration model families
//!
//! Linear and log-linear modes use closed-form ordinary least squares;
//! the quadratic mode solves the degree-2 normal equations with an LU
//! decomposition. R-squared is computed against the fit's own residuals
//! and reported as `None` when the total sum of squares vanishes.

use nalgebra::{DMatrix, DVector};

use super::error::CalibrationError;
use super::types::{CalibrationKind, CalibrationModel, CalibrationPoint};

/// Fit a calibration model of the requested kind
///
/// # Errors
/// [`CalibrationError::InsufficientPoints`] when too few points are
/// supplied (2 for linear, 3 for log-linear and quadratic),
/// [`CalibrationError::NonPositiveDependent`] when a log-linear
/// dependent cannot be logged, and
/// [`CalibrationError::DegenerateModel`] when the system is singular.
pub fn fit(
    points: &[CalibrationPoint],
    kind: CalibrationKind,
) -> Result<CalibrationModel, CalibrationError> {
    match kind {
        CalibrationKind::LogLinear => fit_log_linear(points),
        CalibrationKind::Linear => fit_linear(points),
        CalibrationKind::Quadratic => fit_quadratic(points),
    }
}

fn fit_linear(points: &[CalibrationPoint]) -> Result<CalibrationModel, CalibrationError> {
    if points.len() < 2 {
        return Err(CalibrationError::InsufficientPoints {
            kind: CalibrationKind::Linear,
            n: points.len(),
            required: 2,
        });
    }

    let x: Vec<f64> = points.iter().map(|p| p.independent).collect();
    let y: Vec<f64> = points.iter().map(|p| p.dependent).collect();
    let (slope, intercept) = ols_line(&x, &y).ok_or(CalibrationError::DegenerateModel {
        kind: CalibrationKind::Linear,
        reason: "independent values are collinear",
    })?;

    let r_squared = r_squared(&y, |i| slope * x[i] + intercept);

    Ok(CalibrationModel::Linear {
        slope,
        intercept,
        r_squared,
    })
}

fn fit_log_linear(points: &[CalibrationPoint]) -> Result<CalibrationModel, CalibrationError> {
    if points.len() < 3 {
        return Err(CalibrationError::InsufficientPoints {
            kind: CalibrationKind::LogLinear,
            n: points.len(),
            required: 3,
        });
    }

    let x: Vec<f64> = points.iter().map(|p| p.independent).collect();
    let mut log_y = Vec::with_capacity(points.len());
    for p in points {
        if p.dependent <= 0.0 {
            return Err(CalibrationError::NonPositiveDependent { value: p.dependent });
        }
        log_y.push(p.dependent.log10());
    }

    let (slope, intercept) = ols_line(&x, &log_y).ok_or(CalibrationError::DegenerateModel {
        kind: CalibrationKind::LogLinear,
        reason: "independent values are collinear",
    })?;

    // R-squared in log space, where the regression lives
    let r_squared = r_squared(&log_y, |i| slope * x[i] + intercept);

    Ok(CalibrationModel::LogLinear {
        slope,
        intercept,
        r_squared,
    })
}

fn fit_quadratic(points: &[CalibrationPoint]) -> Result<CalibrationModel, CalibrationError> {
    if points.len() < 3 {
        return Err(CalibrationError::InsufficientPoints {
            kind: CalibrationKind::Quadratic,
            n: points.len(),
            required: 3,
        });
    }

    let n = points.len();
    let design = DMatrix::from_fn(n, 3, |i, j| {
        let x = points[i].independent;
        match j {
            0 => x * x,
            1 => x,
            _ => 1.0,
        }
    });
    let y = DVector::from_fn(n, |i, _| points[i].dependent);

    // Normal equations: (X^T X) beta = X^T y
    let xtx = design.transpose() * &design;
    let xty = design.transpose() * &y;
    let beta = xtx
        .lu()
        .solve(&xty)
        .ok_or(CalibrationError::DegenerateModel {
            kind: CalibrationKind::Quadratic,
            reason: "normal equations are singular",
        })?;

    let (a, b, c) = (beta[0], beta[1], beta[2]);
    let deps: Vec<f64> = points.iter().map(|p| p.dependent).collect();
    let r_squared = r_squared(&deps, |i| {
        let x = points[i].independent;
        a * x * x + b * x + c
    });

    Ok(CalibrationModel::Quadratic { a, b, c, r_squared })
}

/// Closed-form OLS line fit; `None` when the x values are degenerate
fn ols_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(xi, yi)| xi * yi).sum();
    let sum_x2: f64 = x.iter().map(|xi| xi * xi).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < 1e-15 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((slope, intercept))
}

/// R-squared = 1 - SSres/SStot; `None` when SStot vanishes
fn r_squared(observed: &[f64], predicted: impl Fn(usize) -> f64) -> Option<f64> {
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;

    let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_tot.abs() < 1e-15 {
        return None;
    }

    let ss_res: f64 = observed
        .iter()
        .enumerate()
        .map(|(i, y)| (y - predicted(i)).powi(2))
        .sum();

    Some(1.0 - ss_res / ss_tot)
}

/// Pair detected marker positions with reference molecular weights
///
/// Positions are sorted ascending (migration distance) and weights
/// descending (heavier species migrate least); pairs are formed by rank
/// up to the shorter of the two lists.
pub fn match_ladder(peak_positions: &[f64], reference_weights: &[f64]) -> Vec<CalibrationPoint> {
    let mut positions = peak_positions.to_vec();
    positions.sort_by(|a, b| a.total_cmp(b));

    let mut weights = reference_weights.to_vec();
    weights.sort_by(|a, b| b.total_cmp(a));

    positions
        .iter()
        .zip(weights.iter())
        .map(|(&pos, &mw)| CalibrationPoint::new(pos, mw))
        .collect()
}

/// Match a ladder and fit the log-linear molecular-weight model
pub fn fit_ladder(
    peak_positions: &[f64],
    reference_weights: &[f64],
) -> Result<CalibrationModel, CalibrationError> {
    let points = match_ladder(peak_positions, reference_weights);
    fit(&points, CalibrationKind::LogLinear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_fit_exact() {
        // y = 0.0005x + 0.05
        let points: Vec<CalibrationPoint> = [2000.0, 1000.0, 500.0, 250.0, 125.0, 62.5, 31.25, 0.0]
            .iter()
            .map(|&x| CalibrationPoint::new(x, 0.0005 * x + 0.05))
            .collect();

        let model = fit(&points, CalibrationKind::Linear).unwrap();
        match model {
            CalibrationModel::Linear {
                slope,
                intercept,
                r_squared,
            } => {
                assert_relative_eq!(slope, 0.0005, epsilon = 1e-6);
                assert_relative_eq!(intercept, 0.05, epsilon = 1e-6);
                assert_relative_eq!(r_squared.unwrap(), 1.0, epsilon = 1e-6);
            }
            _ => panic!("expected a linear model"),
        }
    }

    #[test]
    fn test_linear_fit_insufficient_points() {
        let points = vec![CalibrationPoint::new(1.0, 2.0)];
        assert!(matches!(
            fit(&points, CalibrationKind::Linear),
            Err(CalibrationError::InsufficientPoints { n: 1, required: 2, .. })
        ));
    }

    #[test]
    fn test_r_squared_undefined_for_constant_dependents() {
        let points = vec![
            CalibrationPoint::new(1.0, 5.0),
            CalibrationPoint::new(2.0, 5.0),
            CalibrationPoint::new(3.0, 5.0),
        ];
        let model = fit(&points, CalibrationKind::Linear).unwrap();
        assert!(model.r_squared().is_none());
    }

    #[test]
    fn test_quadratic_fit_recovers_coefficients() {
        // y = 2x^2 - 3x + 1
        let points: Vec<CalibrationPoint> = (0..6)
            .map(|i| {
                let x = i as f64;
                CalibrationPoint::new(x, 2.0 * x * x - 3.0 * x + 1.0)
            })
            .collect();

        let model = fit(&points, CalibrationKind::Quadratic).unwrap();
        match model {
            CalibrationModel::Quadratic { a, b, c, r_squared } => {
                assert_relative_eq!(a, 2.0, epsilon = 1e-9);
                assert_relative_eq!(b, -3.0, epsilon = 1e-9);
                assert_relative_eq!(c, 1.0, epsilon = 1e-9);
                assert_relative_eq!(r_squared.unwrap(), 1.0, epsilon = 1e-9);
            }
            _ => panic!("expected a quadratic model"),
        }
    }

    #[test]
    fn test_quadratic_fit_singular_when_x_repeats() {
        let points = vec![
            CalibrationPoint::new(2.0, 1.0),
            CalibrationPoint::new(2.0, 2.0),
            CalibrationPoint::new(2.0, 3.0),
        ];
        assert!(matches!(
            fit(&points, CalibrationKind::Quadratic),
            Err(CalibrationError::DegenerateModel { .. })
        ));
    }

    #[test]
    fn test_log_linear_requires_positive_dependents() {
        let points = vec![
            CalibrationPoint::new(10.0, 250.0),
            CalibrationPoint::new(30.0, 0.0),
            CalibrationPoint::new(50.0, 50.0),
        ];
        assert!(matches!(
            fit(&points, CalibrationKind::LogLinear),
            Err(CalibrationError::NonPositiveDependent { .. })
        ));
    }

    #[test]
    fn test_match_ladder_rank_pairing() {
        // Unsorted inputs; extra reference weight is dropped
        let positions = vec![50.0, 10.0, 30.0];
        let weights = vec![25.0, 250.0, 100.0, 10.0];

        let pairs = match_ladder(&positions, &weights);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], CalibrationPoint::new(10.0, 250.0));
        assert_eq!(pairs[1], CalibrationPoint::new(30.0, 100.0));
        assert_eq!(pairs[2], CalibrationPoint::new(50.0, 25.0));
    }

    #[test]
    fn test_fit_ladder_monotonic() {
        let positions = vec![10.0, 30.0, 50.0, 70.0, 90.0];
        let weights = vec![250.0, 100.0, 50.0, 25.0, 10.0];

        let model = fit_ladder(&positions, &weights).unwrap();
        match model {
            CalibrationModel::LogLinear { slope, r_squared, .. } => {
                assert!(slope < 0.0);
                assert!(r_squared.unwrap() > 0.99);
            }
            _ => panic!("expected a log-linear model"),
        }
        // Heavier bands migrate less: predicted MW falls with position
        assert!(model.predict(20.0) > model.predict(80.0));
    }

    #[test]
    fn test_fit_ladder_too_few_pairs() {
        let positions = vec![10.0, 30.0];
        let weights = vec![250.0, 100.0, 50.0];
        assert!(matches!(
            fit_ladder(&positions, &weights),
            Err(CalibrationError::InsufficientPoints { n: 2, required: 3, .. })
        ));
    }
}
