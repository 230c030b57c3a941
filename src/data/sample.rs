//! Built-in reference measurements and synthetic power-law samples.
//!
//! The synthetic generator draws `y = B·x^A·exp(σ·ε)` with `ε ~ N(0, 1)`.
//! Multiplicative log-normal noise keeps every `y` strictly positive, so the
//! output is always inside the fit's domain. `σ = 0` gives an exact power law.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{SampleSet, SyntheticSpec};
use crate::error::AppError;
use crate::math::linspace;

/// x-values of the bundled reference measurements.
pub const BUILTIN_X: [f64; 10] = [4.0, 4.2, 4.5, 4.7, 5.1, 5.5, 5.9, 6.3, 6.8, 7.1];

/// y-values of the bundled reference measurements.
pub const BUILTIN_Y: [f64; 10] = [
    102.56, 130.11, 113.18, 142.05, 167.53, 195.14, 224.87, 256.73, 299.5, 326.72,
];

/// The bundled reference measurements.
pub fn builtin_samples() -> SampleSet {
    SampleSet::from((BUILTIN_X, BUILTIN_Y))
}

/// Generate a seeded synthetic sample.
pub fn generate_synthetic(spec: &SyntheticSpec) -> Result<SampleSet, AppError> {
    validate_spec(spec)?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::numeric(format!("Failed to build noise distribution: {e}")))?;

    let x = linspace(spec.x_min, spec.x_max, spec.count);
    let y = x
        .iter()
        .map(|&xi| {
            let eps: f64 = rng.sample(normal);
            spec.coefficient * xi.powf(spec.exponent) * (spec.noise * eps).exp()
        })
        .collect();

    SampleSet::new(x, y)
}

fn validate_spec(spec: &SyntheticSpec) -> Result<(), AppError> {
    if spec.count < 2 {
        return Err(AppError::input(format!(
            "Synthetic sample needs at least 2 points (got {}).",
            spec.count
        )));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_min > 0.0 && spec.x_max > spec.x_min) {
        return Err(AppError::input(format!(
            "Synthetic x-range must satisfy 0 < x_min < x_max (got [{}, {}]).",
            spec.x_min, spec.x_max
        )));
    }
    if !(spec.coefficient.is_finite() && spec.coefficient > 0.0) {
        return Err(AppError::input(format!(
            "Synthetic coefficient must be positive (got {}).",
            spec.coefficient
        )));
    }
    if !spec.exponent.is_finite() {
        return Err(AppError::input("Synthetic exponent must be finite."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::input(format!(
            "Synthetic noise must be >= 0 (got {}).",
            spec.noise
        )));
    }
    Ok(())
}
