//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - the power-law parameters and fit quality
//! - where the samples came from and when the file was written
//! - a precomputed grid spanning the sample x-range for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::RunOutput;
use crate::domain::{CurveFile, CurveGrid, FitResult};
use crate::error::AppError;
use crate::math::range_of;
use crate::models::sample_curve;

/// Name written into the `tool` field.
pub const TOOL_NAME: &str = "pfit";

/// Build the curve file for a finished run.
pub fn curve_file(run: &RunOutput, grid_points: usize) -> CurveFile {
    let (x_min, x_max) = range_of(run.samples.x()).unwrap_or((1.0, 1.0));
    CurveFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Utc::now(),
        source: run.source.clone(),
        model: run.fit.model,
        fit_quality: run.fit.quality.clone(),
        grid: build_grid(&run.fit, x_min, x_max, grid_points),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::input(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid curve JSON: {e}")))?;
    if curve.grid.x.len() != curve.grid.y.len() {
        return Err(AppError::input("Invalid curve JSON: grid x and y differ in length."));
    }
    Ok(curve)
}

fn build_grid(fit: &FitResult, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let (x, y) = sample_curve(&fit.model, x_min, x_max, n.max(2)).into_iter().unzip();
    CurveGrid { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fit_with_samples;
    use crate::domain::SampleSet;

    #[test]
    fn curve_json_round_trip() {
        let samples = SampleSet::new(vec![1.0, 2.0, 4.0], vec![2.0, 8.0, 32.0]).unwrap();
        let run = run_fit_with_samples("unit".to_string(), samples, Vec::new()).unwrap();
        let curve = curve_file(&run, 100);
        assert_eq!(curve.grid.x.len(), 100);
        assert_eq!(curve.grid.x[0], 1.0);
        assert_eq!(curve.grid.x[99], 4.0);

        let path = std::env::temp_dir().join(format!("pfit_curve_{}.json", std::process::id()));
        write_curve_json(&path, &curve).unwrap();
        let back = read_curve_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.tool, TOOL_NAME);
        assert_eq!(back.source, "unit");
        assert_eq!(back.model, curve.model);
        assert_eq!(back.grid, curve.grid);
    }

    #[test]
    fn missing_curve_file_is_an_input_error() {
        let err = read_curve_json(Path::new("/nonexistent/pfit/curve.json")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
