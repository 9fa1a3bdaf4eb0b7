//! Nonlinear least-squares fitting of the 4PL model
//!
//! The optimizer is a Nelder-Mead simplex over the four coefficients,
//! minimizing the residual sum of squares. Seeding from the data
//! (min/max responses, median concentration, unit slope) is what makes
//! the fit reliable across the model's local minima; the default seeds
//! must not be changed.

use argmin::{
    core::{CostFunction, Error, Executor, TerminationReason, TerminationStatus},
    solver::neldermead::NelderMead,
};
use ndarray::Array1;

use super::error::DoseResponseError;
use super::model::{DoseResponseModel, FourParamLogistic};
use super::types::FitOptions;

struct ResidualSumOfSquares<'a> {
    concentrations: &'a [f64],
    responses: &'a [f64],
}

impl CostFunction for ResidualSumOfSquares<'_> {
    type Param = Array1<f64>;
    type Output = f64;

    fn cost(&self, point: &Self::Param) -> Result<Self::Output, Error> {
        let candidate = FourParamLogistic {
            bottom: point[0],
            hill_slope: point[1],
            ec50: point[2],
            top: point[3],
        };

        let ssr: f64 = self
            .concentrations
            .iter()
            .zip(self.responses)
            .map(|(&x, &y)| (y - candidate.predict(x)).powi(2))
            .sum();

        // The simplex may wander into regions where (x/ec50)^slope is
        // undefined; an infinite cost steers it back
        Ok(if ssr.is_finite() { ssr } else { f64::INFINITY })
    }
}

/// Fit the 4PL model to (concentration, response) pairs
///
/// Returns `DoseResponseModel::FitFailed` when the optimizer does not
/// converge within the iteration budget or lands on an unusable point;
/// this is a status, not an error.
///
/// # Errors
/// [`DoseResponseError`] for malformed input: mismatched lengths, fewer
/// than four distinct concentration levels, or non-positive/non-finite
/// values. Validation runs before any numerical work.
pub fn fit(
    concentrations: &[f64],
    responses: &[f64],
    options: &FitOptions,
) -> Result<DoseResponseModel, DoseResponseError> {
    validate(concentrations, responses)?;

    let seeds = options
        .seeds
        .unwrap_or_else(|| default_seeds(concentrations, responses));
    let start = Array1::from(vec![seeds.bottom, seeds.hill_slope, seeds.ec50, seeds.top]);

    let cost = ResidualSumOfSquares {
        concentrations,
        responses,
    };

    let simplex = initial_simplex(&start);
    let solver = match NelderMead::new(simplex).with_sd_tolerance(options.sd_tolerance) {
        Ok(solver) => solver,
        Err(_) => return Ok(DoseResponseModel::FitFailed),
    };

    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(options.max_iterations))
        .run();

    let state = match result {
        Ok(res) => res.state,
        Err(_) => return Ok(DoseResponseModel::FitFailed),
    };

    // Exhausting the iteration budget is non-convergence; only the
    // solver's own tolerance-based stop counts as a fit
    if !matches!(
        state.termination_status,
        TerminationStatus::Terminated(TerminationReason::SolverConverged)
    ) {
        return Ok(DoseResponseModel::FitFailed);
    }

    let best = match state.best_param {
        Some(param) if state.best_cost.is_finite() => param,
        _ => return Ok(DoseResponseModel::FitFailed),
    };

    let params = FourParamLogistic {
        bottom: best[0],
        hill_slope: best[1],
        ec50: best[2],
        top: best[3],
    };

    // An EC50 at or below zero is outside the model's domain
    if !params.ec50.is_finite() || params.ec50 <= 0.0 {
        return Ok(DoseResponseModel::FitFailed);
    }

    let r_squared = r_squared(concentrations, responses, &params);

    Ok(DoseResponseModel::Fitted { params, r_squared })
}

fn validate(concentrations: &[f64], responses: &[f64]) -> Result<(), DoseResponseError> {
    if concentrations.len() != responses.len() {
        return Err(DoseResponseError::LengthMismatch {
            concentrations: concentrations.len(),
            responses: responses.len(),
        });
    }

    for (index, &x) in concentrations.iter().enumerate() {
        if !x.is_finite() || x <= 0.0 {
            return Err(DoseResponseError::InvalidConcentration { index, value: x });
        }
    }
    for (index, &y) in responses.iter().enumerate() {
        if !y.is_finite() {
            return Err(DoseResponseError::NonFiniteResponse { index });
        }
    }

    let mut levels = concentrations.to_vec();
    levels.sort_by(|a, b| a.total_cmp(b));
    levels.dedup();
    if levels.len() < 4 {
        return Err(DoseResponseError::InsufficientLevels { n: levels.len() });
    }

    Ok(())
}

/// Data-derived starting point: asymptotes from the response range,
/// EC50 from the median concentration, unit Hill slope
fn default_seeds(concentrations: &[f64], responses: &[f64]) -> FourParamLogistic {
    let bottom = responses.iter().cloned().fold(f64::INFINITY, f64::min);
    let top = responses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    FourParamLogistic {
        bottom,
        hill_slope: 1.0,
        ec50: median(concentrations),
        top,
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Simplex around the starting point: one vertex per dimension,
/// perturbed by 0.8% (a small absolute step for zero coordinates)
fn initial_simplex(start: &Array1<f64>) -> Vec<Array1<f64>> {
    let perturbation_percentage = 0.008;
    let mut vertices = vec![start.to_owned()];

    for i in 0..start.len() {
        let perturbation = if start[i] == 0.0 {
            0.00025
        } else {
            perturbation_percentage * start[i]
        };

        let mut vertex = start.to_owned();
        vertex[i] += perturbation;
        vertices.push(vertex);
    }

    vertices
}

fn r_squared(concentrations: &[f64], responses: &[f64], params: &FourParamLogistic) -> Option<f64> {
    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;

    let ss_tot: f64 = responses.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_tot.abs() < 1e-15 {
        return None;
    }

    let ss_res: f64 = concentrations
        .iter()
        .zip(responses)
        .map(|(&x, &y)| (y - params.predict(x)).powi(2))
        .sum();

    Some(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn log_spaced(lo: f64, hi: f64, n: usize) -> Vec<f64> {
        let (l0, l1) = (lo.ln(), hi.ln());
        (0..n)
            .map(|i| (l0 + (l1 - l0) * i as f64 / (n - 1) as f64).exp())
            .collect()
    }

    #[test]
    fn test_fit_recovers_noiseless_4pl() {
        let truth = FourParamLogistic {
            bottom: 0.1,
            hill_slope: 1.2,
            ec50: 50.0,
            top: 2.0,
        };
        let concs = log_spaced(0.1, 1000.0, 8);
        let responses: Vec<f64> = concs.iter().map(|&x| truth.predict(x)).collect();

        let model = fit(&concs, &responses, &FitOptions::default()).unwrap();
        let params = model.params().expect("fit should converge");

        assert_relative_eq!(params.ec50, 50.0, max_relative = 0.01);
        assert!(model.r_squared().unwrap() >= 0.999);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let concs = log_spaced(0.1, 1000.0, 8);
        let truth = FourParamLogistic {
            bottom: 0.05,
            hill_slope: 0.9,
            ec50: 12.0,
            top: 1.8,
        };
        let responses: Vec<f64> = concs.iter().map(|&x| truth.predict(x)).collect();

        let first = fit(&concs, &responses, &FitOptions::default()).unwrap();
        let second = fit(&concs, &responses, &FitOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iteration_cap_exhaustion_is_fit_failed() {
        let truth = FourParamLogistic {
            bottom: 0.1,
            hill_slope: 1.2,
            ec50: 50.0,
            top: 2.0,
        };
        let concs = log_spaced(0.1, 1000.0, 8);
        let responses: Vec<f64> = concs.iter().map(|&x| truth.predict(x)).collect();

        // One iteration cannot reach the sd tolerance; the best vertex
        // may still score well, but the fit did not converge
        let model = fit(
            &concs,
            &responses,
            &FitOptions::default().with_max_iterations(1),
        )
        .unwrap();
        assert_eq!(model, DoseResponseModel::FitFailed);
    }

    #[test]
    fn test_fit_length_mismatch() {
        let result = fit(&[1.0, 2.0, 4.0, 8.0], &[1.0, 2.0], &FitOptions::default());
        assert!(matches!(result, Err(DoseResponseError::LengthMismatch { .. })));
    }

    #[test]
    fn test_fit_too_few_distinct_levels() {
        let concs = vec![1.0, 1.0, 10.0, 10.0, 100.0];
        let responses = vec![0.1, 0.1, 0.5, 0.5, 1.0];
        let result = fit(&concs, &responses, &FitOptions::default());
        assert!(matches!(
            result,
            Err(DoseResponseError::InsufficientLevels { n: 3 })
        ));
    }

    #[test]
    fn test_fit_rejects_nonpositive_concentration() {
        let concs = vec![0.0, 1.0, 10.0, 100.0];
        let responses = vec![0.1, 0.3, 0.7, 1.0];
        let result = fit(&concs, &responses, &FitOptions::default());
        assert!(matches!(
            result,
            Err(DoseResponseError::InvalidConcentration { index: 0, .. })
        ));
    }

    #[test]
    fn test_fit_constant_responses_has_undefined_r2() {
        let concs = vec![1.0, 10.0, 100.0, 1000.0];
        let responses = vec![0.5, 0.5, 0.5, 0.5];

        // Seeds collapse (bottom == top); whatever the outcome, no
        // defined R^2 can be reported
        let model = fit(&concs, &responses, &FitOptions::default()).unwrap();
        assert!(model.r_squared().is_none());
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }
}
