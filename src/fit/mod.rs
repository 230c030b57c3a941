//! Curve fitting.
//!
//! Responsibilities:
//!
//! - validate samples against the log domain
//! - regress `ln y` on `ln x`
//! - map the fitted line back to power-law parameters

pub mod fitter;

pub use fitter::*;
