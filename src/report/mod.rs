//! Reporting utilities: the squared-error metric, residuals and formatted output.
//!
//! The error metric is computed in y-space while the regression minimizes
//! squared error in log-space, so the fit does not minimize `squared_error`.

use crate::domain::{FitQuality, PowerLaw, Residual, SampleSet};
use crate::error::AppError;
use crate::models::evaluate;

pub mod format;

pub use format::*;

/// Total squared error `Σ (predicted - observed)^2` of `model` on `(x, y)`.
///
/// Non-negative for finite inputs. Out-of-domain predictions propagate as NaN.
pub fn squared_error(x: &[f64], y: &[f64], model: &PowerLaw) -> Result<f64, AppError> {
    if x.len() != y.len() {
        return Err(AppError::input(format!(
            "x and y must have the same length (got {} and {}).",
            x.len(),
            y.len()
        )));
    }
    let predicted = evaluate(model, x);
    Ok(predicted
        .iter()
        .zip(y)
        .map(|(p, o)| (p - o) * (p - o))
        .sum())
}

/// Compute fitted values and residuals for each sample.
pub fn compute_residuals(samples: &SampleSet, model: &PowerLaw) -> Result<Vec<Residual>, AppError> {
    let mut out = Vec::with_capacity(samples.len());
    for (index, (x, y_obs)) in samples.points().enumerate() {
        let y_fit = model.predict(x);
        if !y_fit.is_finite() {
            return Err(AppError::numeric(format!(
                "Non-finite model prediction at x[{index}] = {x}."
            )));
        }
        out.push(Residual {
            index,
            x,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
        });
    }
    Ok(out)
}

/// Fit diagnostics for `model` on `samples`.
pub fn fit_quality(samples: &SampleSet, model: &PowerLaw) -> Result<FitQuality, AppError> {
    let n = samples.len();
    if n == 0 {
        return Err(AppError::data("No samples to score."));
    }
    let sse = squared_error(samples.x(), samples.y(), model)?;
    let rmse = (sse / n as f64).sqrt();

    Ok(FitQuality {
        sse,
        rmse,
        r_squared_log: r_squared_log(samples, model),
        n,
    })
}

/// Coefficient of determination of the regression in log-space.
fn r_squared_log(samples: &SampleSet, model: &PowerLaw) -> f64 {
    let log_y: Vec<f64> = samples.y().iter().map(|v| v.ln()).collect();
    let mean = log_y.iter().sum::<f64>() / log_y.len() as f64;

    let ss_tot: f64 = log_y.iter().map(|v| (v - mean) * (v - mean)).sum();
    let ss_res: f64 = samples
        .x()
        .iter()
        .zip(&log_y)
        .map(|(&x, v)| {
            let e = v - model.predict(x).ln();
            e * e
        })
        .sum();

    if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    }
}
