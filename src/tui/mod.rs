//! Ratatui-based interactive chart.
//!
//! Shows the raw samples as a scatter together with the fitted curve, sampled
//! over evenly spaced x-values spanning `[min(x), max(x)]`. The header carries
//! the fitted parameters and the total squared error.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_fit};
use crate::domain::{DataSource, FitConfig};
use crate::error::AppError;
use crate::math::{pad_range, range_of};
use crate::models::sample_curve;

mod plotters_chart;

use plotters_chart::PowerLawChart;

/// Fit, then show the chart until the user quits. Returns the last run shown.
///
/// The first fit happens before the terminal is switched over, so data errors
/// are reported on a normal screen.
pub fn run(config: &FitConfig) -> Result<RunOutput, AppError> {
    let mut app = App::new(config.clone())?;

    {
        let _guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| AppError::numeric(format!("Failed to initialize terminal: {e}")))?;

        app.event_loop(&mut terminal)?;
    }

    Ok(app.run)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::numeric(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::numeric(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: FitConfig,
    run: RunOutput,
    log_axes: bool,
    status: String,
}

impl App {
    fn new(config: FitConfig) -> Result<Self, AppError> {
        let run = run_fit(&config.source)?;
        Ok(Self {
            config,
            run,
            log_axes: false,
            status: "ready".to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::numeric(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::numeric(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::numeric(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('l') => {
                self.log_axes = !self.log_axes;
                self.status = if self.log_axes {
                    "log-log axes".to_string()
                } else {
                    "linear axes".to_string()
                };
            }
            KeyCode::Char('r') => self.resample(),
            _ => {}
        }
        false
    }

    /// Redraw a synthetic sample with the next seed and refit.
    ///
    /// Failures stay in the status line; the previous run remains on screen.
    fn resample(&mut self) {
        let DataSource::Synthetic(spec) = &mut self.config.source else {
            self.status = "resampling needs --synthetic".to_string();
            return;
        };
        spec.seed = spec.seed.wrapping_add(1);
        let seed = spec.seed;
        debug!("resampling with seed {seed}");

        match run_fit(&self.config.source) {
            Ok(run) => {
                self.run = run;
                self.status = format!("resampled (seed={seed})");
            }
            Err(e) => self.status = format!("resample failed: {e}"),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let model = &self.run.fit.model;
        let q = &self.run.fit.quality;

        let lines = vec![
            Line::from(vec![
                Span::styled("pfit", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" | {} | n={}", self.run.source, q.n)),
            ]),
            Line::from(Span::styled(
                format!("a = {} | b = {}", model.exponent, model.coefficient),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(
                    "total squared error = {:.6} | rmse = {:.4} | log-space R^2 = {:.6}",
                    q.sse, q.rmse, q.r_squared_log
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Power-law fit").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(&self.run, self.config.grid_points, self.log_axes);
        let widget = PowerLawChart {
            curve: &series.curve,
            points: &series.points,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: series.x_label,
            y_label: series.y_label,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "l log-log  r resample  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart data for one frame.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    curve: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'static str,
    y_label: &'static str,
}

/// Build chart series for Plotters.
///
/// In log-log mode both axes show natural logs, where the fitted curve is the
/// regression line. Non-finite values are dropped.
fn chart_series(run: &RunOutput, grid_points: usize, log_axes: bool) -> ChartSeries {
    let (x_min, x_max) = range_of(run.samples.x())
        .filter(|(lo, hi)| hi > lo)
        .unwrap_or((1.0, 10.0));

    let to_axes = |(x, y): (f64, f64)| if log_axes { (x.ln(), y.ln()) } else { (x, y) };
    let finite = |&(x, y): &(f64, f64)| x.is_finite() && y.is_finite();

    let curve: Vec<(f64, f64)> = sample_curve(&run.fit.model, x_min, x_max, grid_points.max(2))
        .into_iter()
        .map(to_axes)
        .filter(finite)
        .collect();
    let points: Vec<(f64, f64)> = run.samples.points().map(to_axes).filter(finite).collect();

    let xs: Vec<f64> = points.iter().chain(&curve).map(|&(x, _)| x).collect();
    let ys: Vec<f64> = points.iter().chain(&curve).map(|&(_, y)| y).collect();
    let (x0, x1) = range_of(&xs).filter(|(lo, hi)| hi > lo).unwrap_or((0.0, 1.0));
    let (y0, y1) = range_of(&ys).filter(|(lo, hi)| hi > lo).unwrap_or((0.0, 1.0));
    let (y0, y1) = pad_range(y0, y1, 0.05);

    let (x_label, y_label) = if log_axes { ("ln x", "ln y") } else { ("x", "y") };

    ChartSeries {
        curve,
        points,
        x_bounds: [x0, x1],
        y_bounds: [y0, y1],
        x_label,
        y_label,
    }
}

fn fmt_axis(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
