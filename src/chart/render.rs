use plotters::chart::SeriesAnno;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::config::ChartConfig;
use crate::error::PlotError;

use super::figure::Figure;
use super::font;
use super::layout::{ChartLayout, Dash, Panel, Stroke};

type PanelChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Length of a legend sample line, in points.
const LEGEND_SAMPLE_PT: f64 = 14.0;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Rasterize `layout` into `figure`, panels stacked top to bottom.
pub fn render(
    layout: &ChartLayout<'_>,
    figure: &mut Figure,
    config: &ChartConfig,
) -> Result<(), PlotError> {
    let text = font::text_available(
        &config.font_candidates(),
        config.pt_to_px(config.font_pt),
    );
    let size = figure.size();
    let root = BitMapBackend::with_buffer(figure.pixels_mut(), size).into_drawing_area();
    root.fill(&WHITE).map_err(backend_error)?;

    let margin = config.spacing_px(6.0);
    let areas = root
        .margin(margin, margin, margin, margin)
        .split_evenly((layout.panels.len().max(1), 1));
    for (panel, area) in layout.panels.iter().zip(&areas) {
        draw_panel(area, panel, layout, config, text)?;
    }

    root.present().map_err(backend_error)?;
    log::debug!("Rendered {} panels", layout.panels.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel<'_>,
    layout: &ChartLayout<'_>,
    config: &ChartConfig,
    text: bool,
) -> Result<(), PlotError> {
    let label_px = config.pt_to_px(config.font_pt);

    // Equal y label areas keep the plotting regions of all panels aligned.
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(config.spacing_px(4.0))
        .y_label_area_size(config.spacing_px(if text { 60.0 } else { 6.0 }))
        .x_label_area_size(config.spacing_px(if text && panel.x_axis { 34.0 } else { 4.0 }));
    if text {
        if let Some(title) = panel.title {
            builder.caption(title, font::desc(config.pt_to_px(config.title_pt)));
        }
    }
    let mut chart = builder
        .build_cartesian_2d(layout.x_range.clone(), panel.y_range.clone())
        .map_err(backend_error)?;

    let span = layout.x_range.end - layout.x_range.start;
    let x_ticks = |x: &f64| layout.axis.format_tick(*x, span);
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh();
    if text {
        mesh.label_style(font::desc(label_px))
            .y_desc(panel.kind.y_label())
            .y_labels(5);
        if panel.x_axis {
            mesh.x_desc(layout.x_label)
                .x_labels(8)
                .x_label_formatter(&x_ticks);
        } else {
            mesh.x_labels(0);
        }
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(backend_error)?;

    for series in &panel.series {
        let mut labelled = false;
        for segment in series.segments(&layout.positions) {
            let anno = draw_path(&mut chart, segment, &series.stroke, config)?;
            if let (Some(label), false) = (series.label, labelled) {
                let style = shape_style(&series.stroke, config);
                let sample = config.spacing_px(LEGEND_SAMPLE_PT) as i32;
                anno.label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + sample, y)], style));
                labelled = true;
            }
        }
    }

    for threshold in &panel.thresholds {
        let line = vec![
            (layout.x_range.start, threshold.y),
            (layout.x_range.end, threshold.y),
        ];
        draw_path(&mut chart, line, &threshold.stroke, config)?;
    }

    for marker in &panel.markers {
        let line = vec![(marker.x, panel.y_range.start), (marker.x, panel.y_range.end)];
        draw_path(&mut chart, line, &layout.event_stroke, config)?;
    }

    if text && panel.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .label_font(font::desc(label_px * 0.8))
            .draw()
            .map_err(backend_error)?;
    }
    Ok(())
}

/// Draw one run of points with the given stroke. A lone point becomes a dot.
fn draw_path<'c, 'a, DB: DrawingBackend>(
    chart: &'c mut PanelChart<'a, DB>,
    points: Vec<(f64, f64)>,
    stroke: &Stroke,
    config: &ChartConfig,
) -> Result<&'c mut SeriesAnno<'a, DB>, PlotError> {
    let style = shape_style(stroke, config);
    let drawn = if points.len() == 1 {
        let radius = style.stroke_width.max(2);
        chart.draw_series(std::iter::once(Circle::new(points[0], radius, style.filled())))
    } else {
        match stroke.dash {
            Dash::Solid => chart.draw_series(LineSeries::new(points, style)),
            Dash::Dashed => chart.draw_series(DashedLineSeries::new(
                points,
                config.spacing_px(4.0).max(2),
                config.spacing_px(2.0).max(1),
                style,
            )),
            Dash::Dotted => chart.draw_series(DashedLineSeries::new(
                points,
                config.spacing_px(1.0).max(1),
                config.spacing_px(1.5).max(1),
                style,
            )),
        }
    };
    drawn.map_err(backend_error)
}

fn shape_style(stroke: &Stroke, config: &ChartConfig) -> ShapeStyle {
    stroke
        .color
        .mix(stroke.opacity)
        .stroke_width(config.stroke_px(stroke.width_pt))
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Render(err.to_string())
}
