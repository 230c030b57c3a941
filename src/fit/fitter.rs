//! Log-linearized least squares fit of a power law.
//!
//! Given samples `(x_i, y_i)` with every value strictly positive, the model
//! `y = b·x^a` becomes linear after taking logs:
//!
//! ```text
//! ln y = ln b + a·ln x
//! ```
//!
//! so we regress `ln y` on `ln x` and map the line back:
//! `a = slope`, `b = exp(intercept)`.
//!
//! Inputs outside the log domain are rejected up front with the offending
//! index, instead of letting NaN leak into the parameters.

use log::debug;

use crate::domain::{PowerLaw, SampleSet};
use crate::error::AppError;
use crate::math::fit_line;

/// Fit `y = b·x^a` to paired samples.
///
/// # Errors
/// - `x` and `y` differ in length (exit code 2)
/// - fewer than two points, or any value that is non-finite or `<= 0` (exit code 3)
/// - all `x` identical to working precision, so the regression is singular (exit code 4)
pub fn fit_power_law(x: &[f64], y: &[f64]) -> Result<PowerLaw, AppError> {
    if x.len() != y.len() {
        return Err(AppError::input(format!(
            "x and y must have the same length (got {} and {}).",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(AppError::data(format!(
            "A power-law fit needs at least 2 points (got {}).",
            x.len()
        )));
    }

    let log_x = log_positive("x", x)?;
    let log_y = log_positive("y", y)?;

    let line = fit_line(&log_x, &log_y).ok_or_else(|| {
        AppError::numeric("Singular regression: the x values are (numerically) identical, the exponent is undetermined.")
    })?;
    debug!(
        "log-space line: slope={:.6} intercept={:.6} (n={})",
        line.slope,
        line.intercept,
        x.len()
    );

    let model = PowerLaw::new(line.slope, line.intercept.exp());
    if !(model.exponent.is_finite() && model.coefficient.is_finite()) {
        return Err(AppError::numeric(format!(
            "Fit produced non-finite parameters (a={}, b={}).",
            model.exponent, model.coefficient
        )));
    }

    Ok(model)
}

/// Convenience wrapper over [`fit_power_law`] for a `SampleSet`.
pub fn fit_samples(samples: &SampleSet) -> Result<PowerLaw, AppError> {
    fit_power_law(samples.x(), samples.y())
}

fn log_positive(axis: &str, values: &[f64]) -> Result<Vec<f64>, AppError> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if v.is_finite() && v > 0.0 {
                Ok(v.ln())
            } else {
                Err(AppError::data(format!(
                    "{axis}[{i}] = {v} is not strictly positive; the power-law fit takes ln({axis})."
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_DATA, EXIT_INPUT, EXIT_NUMERIC};

    #[test]
    fn exact_square_law() {
        let model = fit_power_law(&[1.0, 2.0, 4.0], &[2.0, 8.0, 32.0]).unwrap();
        assert!((model.exponent - 2.0).abs() < 1e-9, "a={}", model.exponent);
        assert!((model.coefficient - 2.0).abs() < 1e-9, "b={}", model.coefficient);
    }

    #[test]
    fn recovers_noise_free_parameters() {
        for &(a, b) in &[(0.5, 3.0), (-1.2, 40.0), (2.36, 3.8), (0.0, 7.0)] {
            let x: Vec<f64> = (1..=12).map(|i| 0.3 * i as f64).collect();
            let y: Vec<f64> = x.iter().map(|v| b * v.powf(a)).collect();

            let model = fit_power_law(&x, &y).unwrap();
            assert!((model.exponent - a).abs() < 1e-6, "a: got {} want {a}", model.exponent);
            assert!((model.coefficient - b).abs() < 1e-6, "b: got {} want {b}", model.coefficient);
        }
    }

    #[test]
    fn positive_data_gives_finite_parameters() {
        let x = [4.0, 4.2, 4.5, 4.7, 5.1, 5.5, 5.9, 6.3, 6.8, 7.1];
        let y = [102.56, 130.11, 113.18, 142.05, 167.53, 195.14, 224.87, 256.73, 299.5, 326.72];

        let model = fit_power_law(&x, &y).unwrap();
        assert!(model.exponent.is_finite() && model.coefficient.is_finite());
        // Data grows roughly quadratically.
        assert!(model.exponent > 1.5 && model.exponent < 2.5, "a={}", model.exponent);
        assert!(model.coefficient > 0.0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let x = [1.5, 2.0, 3.3, 8.0];
        let y = [0.7, 1.9, 2.2, 6.1];
        assert_eq!(fit_power_law(&x, &y).unwrap(), fit_power_law(&x, &y).unwrap());
    }

    #[test]
    fn zero_or_negative_values_fail() {
        let err = fit_power_law(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
        assert!(err.message().contains("x[0]"), "{err}");

        let err = fit_power_law(&[1.0, -2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.message().contains("x[1]"), "{err}");

        let err = fit_power_law(&[1.0, 2.0, 3.0], &[1.0, 2.0, -3.0]).unwrap_err();
        assert!(err.message().contains("y[2]"), "{err}");

        assert!(fit_power_law(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn too_few_points_fail() {
        let err = fit_power_law(&[2.0], &[3.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
        assert!(fit_power_law(&[], &[]).is_err());
    }

    #[test]
    fn identical_x_is_singular() {
        let err = fit_power_law(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NUMERIC);
    }

    #[test]
    fn nearly_identical_x_is_singular() {
        for d in [1.1e-12, 1.2e-12, 1.3e-12, 1.4e-12] {
            let err = fit_power_law(&[1.0, 1.0 + d], &[1.0, 2.0]).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_NUMERIC, "spread {d}");
        }
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = fit_power_law(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn fit_samples_delegates() {
        let samples = SampleSet::new(vec![1.0, 2.0, 4.0], vec![2.0, 8.0, 32.0]).unwrap();
        let model = fit_samples(&samples).unwrap();
        assert!((model.exponent - 2.0).abs() < 1e-9);
    }
}
