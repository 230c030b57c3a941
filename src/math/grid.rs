//! Evenly spaced grids and range helpers used by plots and exports.

/// `n` evenly spaced values over `[start, end]`.
///
/// Both endpoints are exact. `n = 0` yields an empty vector and `n = 1`
/// yields `[start]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Finite `(min, max)` of a slice, ignoring NaNs and infinities.
///
/// Returns `None` if no finite value is present.
pub fn range_of(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Widen a range by `frac` of its span on each side (never to zero width).
pub fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_endpoints() {
        let xs = linspace(4.0, 7.1, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 4.0);
        assert_eq!(xs[99], 7.1);

        let step = xs[1] - xs[0];
        for w in xs.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(2.0, 5.0, 2), vec![2.0, 5.0]);
    }

    #[test]
    fn range_ignores_non_finite() {
        assert_eq!(range_of(&[3.0, f64::NAN, -1.0, f64::INFINITY]), Some((-1.0, 3.0)));
        assert_eq!(range_of(&[f64::NAN]), None);
        assert_eq!(range_of(&[]), None);
    }
}
