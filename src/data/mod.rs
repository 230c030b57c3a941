//! Sample sources: built-in measurements, CSV files and synthetic draws.

pub mod sample;

pub use sample::*;

use crate::domain::{DataSource, SampleSet};
use crate::error::AppError;
use crate::io::ingest::{RowError, load_csv_samples};

/// Samples plus provenance, ready for the fit pipeline.
#[derive(Debug, Clone)]
pub struct LoadedSamples {
    pub label: String,
    pub samples: SampleSet,
    /// Rows skipped while reading a CSV (always empty for other sources).
    pub row_errors: Vec<RowError>,
}

/// Resolve a `DataSource` into samples.
pub fn load_samples(source: &DataSource) -> Result<LoadedSamples, AppError> {
    let label = source.label();
    match source {
        DataSource::Builtin => Ok(LoadedSamples {
            label,
            samples: builtin_samples(),
            row_errors: Vec::new(),
        }),
        DataSource::Csv(path) => {
            let ingested = load_csv_samples(path)?;
            Ok(LoadedSamples {
                label,
                samples: ingested.samples,
                row_errors: ingested.row_errors,
            })
        }
        DataSource::Synthetic(spec) => Ok(LoadedSamples {
            label,
            samples: generate_synthetic(spec)?,
            row_errors: Vec::new(),
        }),
    }
}
