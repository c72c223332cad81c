mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use app::TimeSeriesPlotter;
use config::{ChartConfig, DEFAULT_DPI};
use error::PlotError;

/// Script that produces an input file for this tool.
const EXAMPLE_RUN: &str = "bash scripts/run_sample.sh";

#[derive(Parser, Debug)]
#[command(
    name = "rupture-plot",
    about = "Render the four-panel diagnostic chart for a rupture engine time series"
)]
struct Cli {
    /// Engine time series CSV; the chart is written next to it as .png.
    input: Option<PathBuf>,

    /// Output resolution in dots per inch (canvas is 14x10 inches).
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// TrueType font for chart text (a system sans-serif is used otherwise).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let config = ChartConfig::default()
        .with_dpi(cli.dpi)
        .with_font(cli.font);
    let plotter = TimeSeriesPlotter::new(config);

    match plotter.run(cli.input.as_deref()) {
        Ok(path) => {
            println!("Saved plot to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err @ PlotError::InputMissing(_)) => {
            eprintln!("[ERROR] {err}");
            eprintln!("Run the engine first, e.g.:");
            eprintln!("  {EXAMPLE_RUN}");
            ExitCode::from(err.exit_code())
        }
        Err(err) => {
            log::error!("{err:?}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
