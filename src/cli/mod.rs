//! Command-line parsing for the power-law fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pfit", version, about = "Power-law curve fitter (y = b * x^a)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the samples, print parameters and error, and optionally plot/export.
    Fit(FitArgs),
    /// Fit the samples and open the interactive chart.
    Show(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Evaluate a previously exported curve at the given x-values.
    Eval(EvalArgs),
}

/// Where the samples come from.
///
/// With no flags the built-in reference measurements are used.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Read samples from a CSV file with `x` and `y` columns.
    #[arg(long, value_name = "CSV", conflicts_with = "synthetic")]
    pub csv: Option<PathBuf>,

    /// Generate a synthetic sample y = B * x^A * exp(noise * N(0,1)).
    #[arg(long)]
    pub synthetic: bool,

    /// True exponent A for synthetic samples.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub true_exponent: f64,

    /// True coefficient B for synthetic samples.
    #[arg(long, default_value_t = 3.0)]
    pub true_coefficient: f64,

    /// Number of synthetic samples.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Smallest synthetic x-value.
    #[arg(long, default_value_t = 1.0)]
    pub x_min: f64,

    /// Largest synthetic x-value.
    #[arg(long, default_value_t = 10.0)]
    pub x_max: f64,

    /// Log-normal noise level (standard deviation of ln y).
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Random seed for synthetic samples.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Common options for fitting and showing.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of evenly spaced x-values the fitted curve is sampled at.
    #[arg(long, default_value_t = 100)]
    pub grid: usize,

    /// Skip the ASCII plot (drawn by default).
    #[arg(long)]
    pub no_plot: bool,

    /// Print the per-point residual table.
    #[arg(long)]
    pub residuals: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (parameters + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `pfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for evaluating a saved curve.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// Curve JSON file produced by `pfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// x-values to evaluate at.
    #[arg(required = true, allow_negative_numbers = true)]
    pub x: Vec<f64>,
}
