//! Shared "fit pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load samples -> fit -> quality -> residuals
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use log::{debug, info};

use crate::data::load_samples;
use crate::domain::{DataSource, FitResult, Residual, SampleSet};
use crate::error::AppError;
use crate::fit::fit_samples;
use crate::io::ingest::RowError;
use crate::report::{compute_residuals, fit_quality};

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: String,
    pub samples: SampleSet,
    pub row_errors: Vec<RowError>,
    pub fit: FitResult,
    pub residuals: Vec<Residual>,
}

/// Load samples from `source` and run the fit on them.
pub fn run_fit(source: &DataSource) -> Result<RunOutput, AppError> {
    let loaded = load_samples(source)?;
    info!("loaded {} samples from {}", loaded.samples.len(), loaded.label);
    run_fit_with_samples(loaded.label, loaded.samples, loaded.row_errors)
}

/// Run the fit on samples that are already in memory.
pub fn run_fit_with_samples(
    source: String,
    samples: SampleSet,
    row_errors: Vec<RowError>,
) -> Result<RunOutput, AppError> {
    let model = fit_samples(&samples)?;
    let quality = fit_quality(&samples, &model)?;
    let residuals = compute_residuals(&samples, &model)?;

    info!(
        "fitted a={:.6} b={:.6} on n={} (sse={:.6})",
        model.exponent, model.coefficient, quality.n, quality.sse
    );
    debug!("rmse={:.6} r2_log={:.6}", quality.rmse, quality.r_squared_log);

    Ok(RunOutput {
        source,
        samples,
        row_errors,
        fit: FitResult { model, quality },
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_source_runs_end_to_end() {
        let run = run_fit(&DataSource::Builtin).unwrap();
        assert_eq!(run.samples.len(), 10);
        assert_eq!(run.residuals.len(), 10);
        assert!(run.fit.quality.sse > 0.0);
        assert!(run.fit.model.exponent.is_finite());
        assert!(run.row_errors.is_empty());
    }

    #[test]
    fn exact_power_law_scenario() {
        let samples = SampleSet::new(vec![1.0, 2.0, 4.0], vec![2.0, 8.0, 32.0]).unwrap();
        let run = run_fit_with_samples("scenario".to_string(), samples, Vec::new()).unwrap();
        assert!((run.fit.model.exponent - 2.0).abs() < 1e-9);
        assert!((run.fit.model.coefficient - 2.0).abs() < 1e-9);
        assert!(run.fit.quality.sse.abs() < 1e-12);
    }

    #[test]
    fn domain_errors_surface_from_the_pipeline() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap();
        let err = run_fit_with_samples("bad".to_string(), samples, Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }
}
