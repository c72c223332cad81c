use std::ops::Range;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::TimestampParseError;

use super::model::TimeSeriesTable;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Date-time layouts tried after RFC 3339, most specific first.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

// ---------------------------------------------------------------------------
// AxisChoice – the horizontal axis shared by every panel
// ---------------------------------------------------------------------------

/// Horizontal axis of the chart, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisChoice {
    /// Parsed timestamps; `None` where a cell could not be read.
    Calendar(Vec<Option<NaiveDateTime>>),
    /// Row positions `0..N`.
    RowIndex(Range<usize>),
}

impl AxisChoice {
    /// Pick the axis for `table`.
    ///
    /// A single parseable timestamp anywhere in the column commits the whole
    /// series to the calendar axis; otherwise the row index is used.
    pub fn resolve(table: &TimeSeriesTable) -> Self {
        let Some(cells) = table.timestamps() else {
            log::debug!("No timestamp column, using bar index");
            return AxisChoice::RowIndex(0..table.len());
        };

        let mut failures = 0usize;
        let dates: Vec<Option<NaiveDateTime>> = cells
            .iter()
            .map(|cell| {
                let parsed = cell.as_deref().map(parse_timestamp)?;
                match parsed {
                    Ok(dt) => Some(dt),
                    Err(err) => {
                        failures += 1;
                        log::trace!("{err}");
                        None
                    }
                }
            })
            .collect();

        if dates.iter().all(Option::is_none) {
            log::info!("No timestamp could be parsed, using bar index");
            return AxisChoice::RowIndex(0..table.len());
        }
        if failures > 0 {
            log::warn!(
                "{failures} of {} timestamps could not be parsed and are left undated",
                dates.len()
            );
        }
        AxisChoice::Calendar(dates)
    }

    /// Axis title.
    pub fn label(&self) -> &'static str {
        match self {
            AxisChoice::Calendar(_) => "Date",
            AxisChoice::RowIndex(_) => "Bar index",
        }
    }

    /// Number of rows the axis covers.
    pub fn len(&self) -> usize {
        match self {
            AxisChoice::Calendar(dates) => dates.len(),
            AxisChoice::RowIndex(range) => range.len(),
        }
    }

    /// Plot coordinate of `row`: the row number, or seconds since the Unix
    /// epoch for calendar axes. `None` for undated rows.
    pub fn position(&self, row: usize) -> Option<f64> {
        match self {
            AxisChoice::Calendar(dates) => dates
                .get(row)
                .copied()
                .flatten()
                .map(|dt| dt.and_utc().timestamp() as f64),
            AxisChoice::RowIndex(range) => range.contains(&row).then_some(row as f64),
        }
    }

    /// Coordinates of every row, aligned with the table.
    pub fn positions(&self) -> Vec<Option<f64>> {
        (0..self.len()).map(|row| self.position(row)).collect()
    }

    /// Padded x extent covering every defined position.
    pub fn extent(&self) -> Range<f64> {
        let unit = match self {
            AxisChoice::Calendar(_) => SECONDS_PER_DAY,
            AxisChoice::RowIndex(_) => 1.0,
        };
        let (min, max) = self
            .positions()
            .into_iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });

        if min > max {
            return 0.0..unit;
        }
        let span = max - min;
        if span <= 0.0 {
            return (min - unit)..(max + unit);
        }
        let pad = span * 0.05;
        (min - pad)..(max + pad)
    }

    /// Tick label for coordinate `x`, given the visible span.
    pub fn format_tick(&self, x: f64, span: f64) -> String {
        match self {
            AxisChoice::Calendar(_) => {
                let Some(dt) = DateTime::from_timestamp(x.round() as i64, 0) else {
                    return String::new();
                };
                if span < 3.0 * SECONDS_PER_DAY {
                    dt.format("%Y-%m-%d %H:%M").to_string()
                } else {
                    dt.format("%Y-%m-%d").to_string()
                }
            }
            AxisChoice::RowIndex(_) => format!("{}", x.round() as i64),
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse one `timestamp` cell.
///
/// Offsets are normalised to UTC; bare dates are taken at midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampParseError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(dt) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt);
        }
    }
    Err(TimestampParseError(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_support::two_rows;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn no_timestamp_column_uses_row_index() {
        let axis = AxisChoice::resolve(&two_rows(None));

        assert_eq!(axis, AxisChoice::RowIndex(0..2));
        assert_eq!(axis.label(), "Bar index");
        assert_eq!(axis.positions(), vec![Some(0.0), Some(1.0)]);
    }

    #[test]
    fn unparseable_column_falls_back_to_row_index() {
        let axis = AxisChoice::resolve(&two_rows(Some(["soon", "later"])));
        assert_eq!(axis, AxisChoice::RowIndex(0..2));
    }

    #[test]
    fn one_valid_date_commits_to_calendar() {
        let axis = AxisChoice::resolve(&two_rows(Some(["2024-01-01", "not-a-date"])));

        assert_eq!(axis, AxisChoice::Calendar(vec![Some(date(2024, 1, 1)), None]));
        assert_eq!(axis.label(), "Date");
        assert_eq!(axis.position(0), Some(1_704_067_200.0));
        assert_eq!(axis.position(1), None);
    }

    #[test]
    fn accepted_timestamp_layouts() {
        let noon = date(2024, 3, 5).date().and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_timestamp("2024/03/05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_timestamp("20240305").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_timestamp("2024-03-05 12:30:00").unwrap(), noon);
        assert_eq!(parse_timestamp("2024-03-05T12:30").unwrap(), noon);
        assert_eq!(parse_timestamp("2024-03-05T14:30:00+02:00").unwrap(), noon);
        assert_eq!(
            parse_timestamp("2024-13-40"),
            Err(TimestampParseError("2024-13-40".into()))
        );
    }

    #[test]
    fn extent_pads_and_widens() {
        assert_eq!(AxisChoice::RowIndex(0..11).extent(), -0.5..10.5);
        assert_eq!(AxisChoice::RowIndex(0..1).extent(), -1.0..1.0);
        assert_eq!(AxisChoice::RowIndex(0..0).extent(), 0.0..1.0);

        let single = AxisChoice::Calendar(vec![Some(date(2024, 1, 1)), None]);
        let x = 1_704_067_200.0;
        assert_eq!(single.extent(), (x - SECONDS_PER_DAY)..(x + SECONDS_PER_DAY));
    }

    #[test]
    fn tick_labels_follow_axis_kind() {
        let calendar = AxisChoice::Calendar(vec![Some(date(2024, 1, 1))]);
        assert_eq!(calendar.format_tick(1_704_067_200.0, 30.0 * SECONDS_PER_DAY), "2024-01-01");
        assert_eq!(calendar.format_tick(1_704_067_200.0, 3600.0), "2024-01-01 00:00");
        assert_eq!(AxisChoice::RowIndex(0..5).format_tick(3.0, 5.0), "3");
    }
}
