use std::ops::Range;

use plotters::style::RGBColor;

use crate::color::{threshold_shades, ChartColors};
use crate::data::axis::AxisChoice;
use crate::data::model::{Column, TimeSeriesTable};

/// Severity levels drawn across the rho panel, most critical first.
pub const RHO_THRESHOLDS: [f64; 3] = [1.0, 0.85, 0.60];

pub const CHART_TITLE: &str = "Rupture Engine Output";

// ---------------------------------------------------------------------------
// Strokes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

/// How a line is drawn. Widths are in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RGBColor,
    pub width_pt: f64,
    pub opacity: f64,
    pub dash: Dash,
}

impl Stroke {
    pub fn solid(color: RGBColor, width_pt: f64) -> Self {
        Self {
            color,
            width_pt,
            opacity: 1.0,
            dash: Dash::Solid,
        }
    }

    pub fn dashed(self) -> Self {
        Self {
            dash: Dash::Dashed,
            ..self
        }
    }

    pub fn dotted(self) -> Self {
        Self {
            dash: Dash::Dotted,
            ..self
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }
}

// ---------------------------------------------------------------------------
// Panel contents
// ---------------------------------------------------------------------------

/// One plotted column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    /// Legend entry; `None` keeps the series out of the legend.
    pub label: Option<&'static str>,
    pub values: &'a [f64],
    pub stroke: Stroke,
}

impl Series<'_> {
    /// Split the series into drawable runs of `(x, y)` points.
    ///
    /// A row without an x position or with a non-finite value breaks the line.
    pub fn segments(&self, positions: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (x, &y) in positions.iter().zip(self.values) {
            match x {
                Some(x) if y.is_finite() => current.push((*x, y)),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// A horizontal reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub y: f64,
    pub stroke: Stroke,
}

/// A vertical event line at a row's x position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub row: usize,
    pub x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Close,
    CombinedResidual,
    StrainCapacity,
    Rho,
}

impl PanelKind {
    /// Top-to-bottom order of the figure.
    pub const ORDER: [PanelKind; 4] = [
        PanelKind::Close,
        PanelKind::CombinedResidual,
        PanelKind::StrainCapacity,
        PanelKind::Rho,
    ];

    pub fn y_label(self) -> &'static str {
        match self {
            PanelKind::Close => "Close",
            PanelKind::CombinedResidual => "Combined r",
            PanelKind::StrainCapacity => "S / E",
            PanelKind::Rho => "rho",
        }
    }

    /// Whether confirmed events are marked on this panel.
    pub fn shows_events(self) -> bool {
        matches!(self, PanelKind::Close | PanelKind::Rho)
    }
}

/// Everything drawn in one sub-plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<'a> {
    pub kind: PanelKind,
    pub title: Option<&'static str>,
    pub series: Vec<Series<'a>>,
    pub thresholds: Vec<Threshold>,
    pub markers: Vec<Marker>,
    pub legend: bool,
    /// Whether this panel carries the x tick labels and axis title.
    pub x_axis: bool,
    pub y_range: Range<f64>,
}

impl<'a> Panel<'a> {
    fn new(kind: PanelKind, series: Vec<Series<'a>>, thresholds: Vec<Threshold>) -> Self {
        let y_range = value_range(
            series
                .iter()
                .flat_map(|s| s.values.iter().copied())
                .chain(thresholds.iter().map(|t| t.y)),
        );
        Panel {
            kind,
            title: None,
            legend: series.iter().filter(|s| s.label.is_some()).count() > 1,
            series,
            thresholds,
            markers: Vec::new(),
            x_axis: false,
            y_range,
        }
    }
}

// ---------------------------------------------------------------------------
// ChartLayout – the full figure, before rasterization
// ---------------------------------------------------------------------------

/// Geometry and styling of the four-panel figure.
///
/// Every panel is drawn against [`x_range`](Self::x_range) and the shared
/// [`positions`](Self::positions), so a vertical slice maps to the same row
/// in all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout<'a> {
    pub axis: &'a AxisChoice,
    pub positions: Vec<Option<f64>>,
    pub x_range: Range<f64>,
    pub x_label: &'static str,
    pub panels: Vec<Panel<'a>>,
    pub event_stroke: Stroke,
}

impl<'a> ChartLayout<'a> {
    pub fn build(table: &'a TimeSeriesTable, axis: &'a AxisChoice, colors: &ChartColors) -> Self {
        let panels = PanelKind::ORDER
            .iter()
            .map(|&kind| build_panel(kind, table, colors))
            .collect();

        ChartLayout {
            axis,
            positions: axis.positions(),
            x_range: axis.extent(),
            x_label: axis.label(),
            panels,
            event_stroke: Stroke::solid(colors.event, 0.8).with_opacity(0.6),
        }
    }

    #[cfg(test)]
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel<'a>> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    /// Total number of event lines across all panels.
    pub fn marker_count(&self) -> usize {
        self.panels.iter().map(|p| p.markers.len()).sum()
    }
}

fn build_panel<'a>(kind: PanelKind, table: &'a TimeSeriesTable, colors: &ChartColors) -> Panel<'a> {
    let line = |column: Column, stroke: Stroke| Series {
        label: None,
        values: table.column(column),
        stroke,
    };

    match kind {
        PanelKind::Close => {
            let mut panel = Panel::new(
                kind,
                vec![line(Column::Close, Stroke::solid(colors.close, 0.8))],
                Vec::new(),
            );
            panel.title = Some(CHART_TITLE);
            panel
        }
        PanelKind::CombinedResidual => Panel::new(
            kind,
            vec![line(Column::RCombined, Stroke::solid(colors.residual, 0.6))],
            Vec::new(),
        ),
        PanelKind::StrainCapacity => Panel::new(
            kind,
            vec![
                Series {
                    label: Some("Strain S"),
                    ..line(Column::Strain, Stroke::solid(colors.strain, 0.8))
                },
                Series {
                    label: Some("Capacity E"),
                    ..line(Column::Capacity, Stroke::solid(colors.capacity, 0.8).dashed())
                },
            ],
            Vec::new(),
        ),
        PanelKind::Rho => {
            let thresholds = RHO_THRESHOLDS
                .iter()
                .zip(threshold_shades(RHO_THRESHOLDS.len()))
                .map(|(&y, shade)| Threshold {
                    y,
                    stroke: Stroke::solid(shade, 0.5).dotted(),
                })
                .collect();
            let mut panel = Panel::new(
                kind,
                vec![line(Column::Rho, Stroke::solid(colors.rho, 0.8))],
                thresholds,
            );
            panel.x_axis = true;
            panel
        }
    }
}

/// Largest magnitude an axis bound may take. Keeping both bounds within this
/// keeps `end - start` finite, which tick generation relies on.
const RANGE_LIMIT: f64 = f64::MAX / 4.0;

/// Padded range covering every finite value.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    // Scaled before subtracting: `max - min` overflows for opposite extremes.
    let pad = (max * 0.05 - min * 0.05).abs();
    let pad = if pad < 1e-12 {
        if min.abs() > 1e-12 { min.abs() * 0.05 } else { 0.5 }
    } else {
        pad
    };
    let start = (min - pad).clamp(-RANGE_LIMIT, RANGE_LIMIT);
    let end = (max + pad).clamp(-RANGE_LIMIT, RANGE_LIMIT);
    if start < end {
        start..end
    } else {
        // Everything sits beyond the limit on one side.
        let edge = start.signum() * RANGE_LIMIT;
        (edge - RANGE_LIMIT * 0.05).max(-RANGE_LIMIT)..(edge + RANGE_LIMIT * 0.05).min(RANGE_LIMIT)
    }
}
