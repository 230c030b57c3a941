//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or evaluation

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Paired `(x, y)` measurements.
///
/// Only equal length is enforced here; positivity and the minimum point count
/// are checked by the fit, which is where they matter.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, AppError> {
        if x.len() != y.len() {
            return Err(AppError::input(format!(
                "x and y must have the same length (got {} and {}).",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl<const N: usize> From<([f64; N], [f64; N])> for SampleSet {
    fn from((x, y): ([f64; N], [f64; N])) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }
}

/// Fitted power law `y = coefficient · x^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLaw {
    /// `a`
    pub exponent: f64,
    /// `b`
    pub coefficient: f64,
}

impl PowerLaw {
    pub fn new(exponent: f64, coefficient: f64) -> Self {
        Self {
            exponent,
            coefficient,
        }
    }

    /// `b · x^a`, with IEEE semantics for out-of-domain `x` (NaN, never a panic).
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }
}

impl std::fmt::Display for PowerLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = {:.6} * x^{:.6}", self.coefficient, self.exponent)
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Sum of squared residuals in y-space.
    pub sse: f64,
    pub rmse: f64,
    /// Coefficient of determination of the log-space regression.
    pub r_squared_log: f64,
    pub n: usize,
}

/// Fit output: parameters plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: PowerLaw,
    pub quality: FitQuality,
}

/// A per-point fitted result (used for tables and exports).
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub index: usize,
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    /// `y_obs - y_fit`
    pub residual: f64,
}

/// Settings for the synthetic sample generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub exponent: f64,
    pub coefficient: f64,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the multiplicative log-normal noise.
    pub noise: f64,
    pub seed: u64,
}

/// Where the samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// The bundled reference measurements.
    Builtin,
    Csv(PathBuf),
    Synthetic(SyntheticSpec),
}

impl DataSource {
    /// Short label for headers and logs.
    pub fn label(&self) -> String {
        match self {
            DataSource::Builtin => "built-in measurements".to_string(),
            DataSource::Csv(path) => format!("csv {}", path.display()),
            DataSource::Synthetic(spec) => format!(
                "synthetic y = {} * x^{} (noise={}, seed={})",
                spec.coefficient, spec.exponent, spec.noise, spec.seed
            ),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: DataSource,

    /// Number of x-values the fitted curve is sampled at for plots and exports.
    pub grid_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub show_residuals: bool,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub model: PowerLaw,
    pub fit_quality: FitQuality,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_mismatched_lengths() {
        let err = SampleSet::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn predict_follows_real_exponentiation() {
        let model = PowerLaw::new(2.0, 3.0);
        assert_eq!(model.predict(2.0), 12.0);
        assert_eq!(model.predict(0.0), 0.0);

        let sqrt = PowerLaw::new(0.5, 1.0);
        assert!(sqrt.predict(-4.0).is_nan());
    }
}
