//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads samples and runs the fit
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, DataArgs, EvalArgs, FitArgs, PlotArgs};
use crate::domain::{DataSource, FitConfig, SyntheticSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `pfit` and `pfit --csv data.csv` to behave like `pfit show ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(&fit_config_from_args(&args)),
        Command::Show(args) => handle_show(&fit_config_from_args(&args)),
        Command::Plot(args) => handle_plot(args),
        Command::Eval(args) => handle_eval(args),
    }
}

fn handle_fit(config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(&config.source)?;

    println!("{}", crate::report::format_run_summary(&run));

    if config.show_residuals {
        println!("{}", crate::report::format_residuals(&run.residuals));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.samples,
            &run.fit.model,
            config.plot_width,
            config.plot_height,
            config.grid_points,
        );
        println!("{plot}");
    }

    write_exports(&run, config)
}

fn handle_show(config: &FitConfig) -> Result<(), AppError> {
    let run = crate::tui::run(config)?;

    // Once the terminal is restored, leave the numbers behind on stdout.
    println!("{}", crate::report::format_run_summary(&run));
    write_exports(&run, config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let ys = crate::models::evaluate(&curve.model, &args.x);

    print!("{}", crate::report::format_evaluations(&args.x, &ys));
    Ok(())
}

fn write_exports(run: &pipeline::RunOutput, config: &FitConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals)?;
        info!("wrote results to {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        let curve = crate::io::curve::curve_file(run, config.grid_points);
        crate::io::curve::write_curve_json(path, &curve)?;
        info!("wrote curve to {}", path.display());
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        source: data_source_from_args(&args.data),
        grid_points: args.grid,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        show_residuals: args.residuals,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

pub fn data_source_from_args(args: &DataArgs) -> DataSource {
    if let Some(path) = &args.csv {
        return DataSource::Csv(path.clone());
    }
    if args.synthetic {
        return DataSource::Synthetic(SyntheticSpec {
            exponent: args.true_exponent,
            coefficient: args.true_coefficient,
            count: args.count,
            x_min: args.x_min,
            x_max: args.x_max,
            noise: args.noise,
            seed: args.seed,
        });
    }
    DataSource::Builtin
}

/// Rewrite argv so `pfit` defaults to `pfit show`.
///
/// Rules:
/// - `pfit`                      -> `pfit show`
/// - `pfit --csv data.csv ...`   -> `pfit show --csv data.csv ...`
/// - `pfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "show" | "plot" | "eval");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_shows() {
        assert_eq!(rewrite_args(argv(&["pfit"])), argv(&["pfit", "show"]));
    }

    #[test]
    fn leading_flags_go_to_show() {
        assert_eq!(
            rewrite_args(argv(&["pfit", "--csv", "d.csv"])),
            argv(&["pfit", "show", "--csv", "d.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["pfit", "fit"])), argv(&["pfit", "fit"]));
        assert_eq!(rewrite_args(argv(&["pfit", "--help"])), argv(&["pfit", "--help"]));
    }

    #[test]
    fn config_from_default_args_uses_builtin_data() {
        let cli = crate::cli::Cli::parse_from(["pfit", "fit", "--no-plot"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(config.source, DataSource::Builtin);
        assert!(!config.plot);
        assert_eq!(config.grid_points, 100);
    }

    #[test]
    fn config_plots_by_default() {
        let cli = crate::cli::Cli::parse_from(["pfit", "fit", "--csv", "d.csv"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args);
        assert!(config.plot);
        assert_eq!((config.plot_width, config.plot_height), (80, 20));
    }

    #[test]
    fn config_from_csv_args() {
        let cli = crate::cli::Cli::parse_from(["pfit", "fit", "--csv", "d.csv"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(
            fit_config_from_args(&args).source,
            DataSource::Csv("d.csv".into())
        );
    }
}
