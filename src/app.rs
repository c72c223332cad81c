use std::path::{Path, PathBuf};

use crate::chart::figure::Figure;
use crate::chart::layout::ChartLayout;
use crate::chart::{overlay, render};
use crate::color::ChartColors;
use crate::config::ChartConfig;
use crate::data::axis::AxisChoice;
use crate::data::events::EventMask;
use crate::data::loader;
use crate::error::PlotError;
use crate::output;

// ---------------------------------------------------------------------------
// TimeSeriesPlotter – the whole run, top to bottom
// ---------------------------------------------------------------------------

/// Turns one engine time series file into one diagnostic chart.
pub struct TimeSeriesPlotter {
    config: ChartConfig,
    colors: ChartColors,
}

impl TimeSeriesPlotter {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            colors: ChartColors::default(),
        }
    }

    /// Run the pipeline for `input` and return the path of the written image.
    ///
    /// The input is checked before any work is done. The figure is owned by
    /// this call and is released before it returns, whichever stage fails.
    pub fn run(&self, input: Option<&Path>) -> Result<PathBuf, PlotError> {
        let input = match input {
            Some(path) if path.exists() => path,
            other => return Err(PlotError::InputMissing(other.map(Path::to_path_buf))),
        };

        let table = loader::load_file(input)?;
        if table.is_empty() {
            log::warn!("{} has a header but no rows", input.display());
        }
        let axis = AxisChoice::resolve(&table);
        let events = EventMask::from_table(&table);
        log::info!(
            "Plotting {} rows against {} with {} confirmed event(s)",
            table.len(),
            axis.label(),
            events.count()
        );

        let mut layout = ChartLayout::build(&table, &axis, &self.colors);
        let marked = overlay::apply(&mut layout, &events);
        log::debug!(
            "{marked} event(s) marked, {} marker line(s) in total",
            layout.marker_count()
        );

        let out_path = output::derive_output_path(input);
        let mut figure = Figure::new(self.config.pixel_size());
        render::render(&layout, &mut figure, &self.config)?;
        output::write_figure(&figure, &out_path)?;
        Ok(out_path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const EXAMPLE: &str = "close,r_combined,strain,capacity,rho,confirmed\n\
                           100,0.1,0.2,1.0,0.3,0\n\
                           101,0.4,0.9,1.0,0.95,1\n";

    fn plotter() -> TimeSeriesPlotter {
        TimeSeriesPlotter::new(ChartConfig::default().with_dpi(30))
    }

    #[test]
    fn writes_png_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("series.csv");
        fs::write(&input, EXAMPLE).unwrap();

        let out = plotter().run(Some(&input)).unwrap();

        assert_eq!(out, dir.path().join("series.png"));
        assert_eq!(image::image_dimensions(&out).unwrap(), (420, 300));
    }

    #[test]
    fn missing_input_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.csv");

        let err = plotter().run(Some(&input)).unwrap_err();
        assert!(matches!(err, PlotError::InputMissing(Some(_))));
        assert!(!dir.path().join("absent.png").exists());

        let err = plotter().run(None).unwrap_err();
        assert!(matches!(err, PlotError::InputMissing(None)));
    }

    #[test]
    fn schema_error_leaves_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("partial.csv");
        fs::write(&input, "close,r_combined\n1,2\n").unwrap();

        let err = plotter().run(Some(&input)).unwrap_err();
        assert!(matches!(err, PlotError::Schema { .. }));
        assert!(!dir.path().join("partial.png").exists());
    }

    #[test]
    fn extreme_finite_values_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("extreme.csv");
        fs::write(
            &input,
            "close,r_combined,strain,capacity,rho\n\
             1e308,-1e308,3,4,5\n\
             -1e308,1e308,3,4,5\n",
        )
        .unwrap();

        let out = plotter().run(Some(&input)).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn blocked_destination_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("series.csv");
        fs::write(&input, EXAMPLE).unwrap();
        // A directory where the image should go.
        fs::create_dir(dir.path().join("series.png")).unwrap();

        let err = plotter().run(Some(&input)).unwrap_err();
        assert!(matches!(err, PlotError::Write { .. }));
    }
}
