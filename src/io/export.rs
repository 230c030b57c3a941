//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Residual;
use crate::error::AppError;

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, residuals)
}

/// Write per-point results as CSV to any writer.
pub fn write_results<W: Write>(mut out: W, residuals: &[Residual]) -> Result<(), AppError> {
    writeln!(out, "index,x,y_obs,y_fit,residual,squared_residual")
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10}",
            r.index,
            r.x,
            r.y_obs,
            r.y_fit,
            r.residual,
            r.residual * r.residual,
        )
        .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
