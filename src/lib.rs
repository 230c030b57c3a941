//! `power-fit` library crate.
//!
//! Fits `y = b·x^a` to paired measurements by log-linearized least squares,
//! evaluates the fitted curve and scores it with a sum of squared residuals.
//!
//! The binary (`pfit`) is a thin wrapper around this library so that:
//!
//! - the fit / evaluate / error functions are testable without spawning processes
//! - front-ends (report, ASCII plot, TUI) stay separate from the math

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;

pub use domain::{FitQuality, FitResult, PowerLaw, SampleSet};
pub use error::AppError;
pub use fit::fit_power_law;
pub use models::evaluate;
pub use report::squared_error;
