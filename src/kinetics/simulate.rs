//! Two-phase pseudo-first-order sensorgram simulation
//!
//! Association: R(t) = Req * (1 - e^(-kobs*t)) with
//! kobs = kon*conc + koff and Req = conc*Rmax*kon / kobs.
//! Dissociation: R(t) = Rend * e^(-koff*t), time-shifted to follow the
//! association phase, where Rend is the association phase's final value.

use super::error::KineticsError;
use super::types::{KineticsParameters, Sensorgram, SensorgramSettings};

/// Simulate a sensorgram from rate constants and run settings
///
/// # Errors
/// [`KineticsError::InvalidParameter`] for negative or non-finite
/// inputs, and [`KineticsError::DegenerateModel`] when
/// kon*concentration + koff is zero (no observable binding).
pub fn simulate(
    params: &KineticsParameters,
    settings: &SensorgramSettings,
) -> Result<Sensorgram, KineticsError> {
    validate(params, settings)?;

    let conc = settings.analyte_concentration;
    let k_obs = params.kon * conc + params.koff;
    if k_obs == 0.0 {
        return Err(KineticsError::DegenerateModel);
    }

    let r_eq = conc * settings.rmax * params.kon / k_obs;

    let assoc_times = linspace(0.0, settings.association_duration, settings.association_samples);
    let mut times = Vec::with_capacity(settings.association_samples + settings.dissociation_samples);
    let mut responses = Vec::with_capacity(times.capacity());

    for &t in &assoc_times {
        times.push(t);
        responses.push(r_eq * (1.0 - (-k_obs * t).exp()));
    }

    let association_len = times.len();
    let r_end = responses.last().copied().unwrap_or(0.0);

    for &t in &linspace(0.0, settings.dissociation_duration, settings.dissociation_samples) {
        times.push(settings.association_duration + t);
        responses.push(r_end * (-params.koff * t).exp());
    }

    Ok(Sensorgram {
        times,
        responses,
        association_len,
    })
}

fn validate(
    params: &KineticsParameters,
    settings: &SensorgramSettings,
) -> Result<(), KineticsError> {
    let checks: [(&'static str, f64); 6] = [
        ("kon", params.kon),
        ("koff", params.koff),
        ("analyte_concentration", settings.analyte_concentration),
        ("association_duration", settings.association_duration),
        ("dissociation_duration", settings.dissociation_duration),
        ("rmax", settings.rmax),
    ];
    for (param, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(KineticsError::InvalidParameter { param, value });
        }
    }
    for (param, value) in [
        ("association_samples", settings.association_samples),
        ("dissociation_samples", settings.dissociation_samples),
    ] {
        if value < 2 {
            return Err(KineticsError::InvalidParameter {
                param,
                value: value as f64,
            });
        }
    }
    Ok(())
}

/// Evenly spaced samples over [start, end], endpoints included
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    debug_assert!(n >= 2);
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
