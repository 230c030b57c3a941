//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::Residual;
use crate::math::range_of;

/// Format the full run summary (dataset stats + fitted parameters + error).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== pfit - power-law fit ===\n");
    out.push_str(&format!("Source: {}\n", run.source));

    let (x_min, x_max) = range_of(run.samples.x()).unwrap_or((f64::NAN, f64::NAN));
    let (y_min, y_max) = range_of(run.samples.y()).unwrap_or((f64::NAN, f64::NAN));
    out.push_str(&format!(
        "Points: n={} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n",
        run.samples.len(),
    ));
    if !run.row_errors.is_empty() {
        out.push_str(&format!("Skipped rows: {}\n", run.row_errors.len()));
        for e in run.row_errors.iter().take(5) {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
        if run.row_errors.len() > 5 {
            out.push_str(&format!("  ... and {} more\n", run.row_errors.len() - 5));
        }
    }

    let model = &run.fit.model;
    let q = &run.fit.quality;
    out.push_str("\nModel: y = b * x^a\n");
    out.push_str(&format!("- exponent a   : {}\n", model.exponent));
    out.push_str(&format!("- coefficient b: {}\n", model.coefficient));
    out.push_str(&format!("- curve        : {model}\n"));
    out.push_str(&format!("\nTotal squared error: {}\n", q.sse));
    out.push_str(&format!("RMSE={:.4} | log-space R^2={:.6}\n", q.rmse, q.r_squared_log));

    out
}

/// Format the per-point residual table.
pub fn format_residuals(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>5} {:>12} {:>14} {:>14} {:>14}",
            "i", "x", "y_obs", "y_fit", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<5} {:-<12} {:-<14} {:-<14} {:-<14}\n",
        "", "", "", "", ""
    ));

    for r in rows {
        out.push_str(&format!(
            "{:>5} {:>12.4} {:>14.4} {:>14.4} {:>14.4}\n",
            r.index, r.x, r.y_obs, r.y_fit, r.residual
        ));
    }

    out
}

/// Format evaluated `(x, y)` pairs, one per line.
pub fn format_evaluations(xs: &[f64], ys: &[f64]) -> String {
    let mut out = String::new();
    for (x, y) in xs.iter().zip(ys) {
        out.push_str(&format!("{x}\t{y}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fit_with_samples;
    use crate::domain::SampleSet;

    #[test]
    fn summary_reports_parameters_and_error() {
        let samples = SampleSet::new(vec![1.0, 2.0, 4.0], vec![2.0, 8.0, 32.0]).unwrap();
        let run = run_fit_with_samples("test data".to_string(), samples, Vec::new()).unwrap();

        let txt = format_run_summary(&run);
        assert!(txt.contains("Source: test data"));
        assert!(txt.contains("Points: n=3 | x=[1.000, 4.000] | y=[2.000, 32.000]"));
        assert!(txt.contains("- exponent a   : "));
        assert!(txt.contains("Total squared error: "));
        assert!(!txt.contains("Skipped rows"));
    }

    #[test]
    fn residual_table_has_one_line_per_point() {
        let rows = vec![
            Residual { index: 0, x: 1.0, y_obs: 3.0, y_fit: 2.0, residual: 1.0 },
            Residual { index: 1, x: 2.0, y_obs: 3.0, y_fit: 4.0, residual: -1.0 },
        ];
        let txt = format_residuals(&rows);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("residual"));
        assert!(lines[3].trim_end().ends_with("-1.0000"));
    }

    #[test]
    fn evaluations_are_tab_separated() {
        assert_eq!(format_evaluations(&[1.0, 2.0], &[2.0, 8.0]), "1\t2\n2\t8\n");
    }
}
