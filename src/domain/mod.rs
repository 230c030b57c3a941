//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the input sample set (`SampleSet`) and where it comes from (`DataSource`)
//! - the fitted model (`PowerLaw`) and its diagnostics (`FitQuality`, `FitResult`)
//! - per-point residuals and the saved curve schema (`CurveFile`)

pub mod types;

pub use types::*;
