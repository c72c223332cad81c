use crate::data::events::EventMask;

use super::layout::{ChartLayout, Marker};

/// Place a vertical marker for every confirmed row on the panels that show
/// events.
///
/// Returns the number of rows marked. A flagged row with no position on the
/// axis (an undated row of a calendar axis) cannot be placed and is skipped.
/// Positions come from the axis the layout was built on.
pub fn apply(layout: &mut ChartLayout<'_>, events: &EventMask) -> usize {
    let axis = layout.axis;
    let mut placed = 0;
    let mut skipped = 0;

    for row in events.indices() {
        let Some(x) = axis.position(row) else {
            skipped += 1;
            log::debug!("Confirmed row {row} has no axis position");
            continue;
        };
        for panel in layout.panels.iter_mut().filter(|p| p.kind.shows_events()) {
            panel.markers.push(Marker { row, x });
        }
        placed += 1;
    }

    if skipped > 0 {
        log::warn!("{skipped} confirmed event(s) left unmarked: timestamp could not be parsed");
    }
    log::debug!("Marked {placed} confirmed event(s)");
    placed
}
