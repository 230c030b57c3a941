//! Power-law evaluation.
//!
//! Two primitive operations:
//! - evaluate the model at a set of x-values (residuals, error metric)
//! - sample the model on an evenly spaced grid (plots, curve exports)

use crate::domain::PowerLaw;
use crate::math::linspace;

/// Evaluate `b · x^a` element-wise.
///
/// The output has the same length as `xs`. Out-of-domain inputs (negative `x`
/// with a fractional exponent) produce NaN in their slot.
pub fn evaluate(model: &PowerLaw, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| model.predict(x)).collect()
}

/// Sample the model at `n` evenly spaced x-values over `[x_min, x_max]`.
pub fn sample_curve(model: &PowerLaw, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    linspace(x_min, x_max, n)
        .into_iter()
        .map(|x| (x, model.predict(x)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_preserves_length_and_order() {
        let model = PowerLaw::new(2.0, 2.0);
        assert_eq!(evaluate(&model, &[1.0, 2.0, 4.0]), vec![2.0, 8.0, 32.0]);
        assert!(evaluate(&model, &[]).is_empty());
    }

    #[test]
    fn evaluate_is_monotonic_for_positive_parameters() {
        let xs: Vec<f64> = (1..=200).map(|i| i as f64 * 0.05).collect();
        for &(a, b) in &[(0.3, 1.0), (1.0, 0.5), (2.7, 12.0)] {
            let ys = evaluate(&PowerLaw::new(a, b), &xs);
            assert!(ys.windows(2).all(|w| w[1] > w[0]), "a={a} b={b}");
        }
    }

    #[test]
    fn evaluate_yields_nan_outside_domain() {
        let ys = evaluate(&PowerLaw::new(1.5, 1.0), &[-1.0, 1.0]);
        assert!(ys[0].is_nan());
        assert_eq!(ys[1], 1.0);
    }

    #[test]
    fn sample_curve_spans_the_range() {
        let curve = sample_curve(&PowerLaw::new(1.0, 3.0), 4.0, 7.1, 100);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0], (4.0, 12.0));
        assert_eq!(curve[99].0, 7.1);
    }
}
