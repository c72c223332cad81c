use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column – typed key for the required numeric columns
// ---------------------------------------------------------------------------

/// A required numeric column of the engine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Close,
    RCombined,
    Strain,
    Capacity,
    Rho,
}

impl Column {
    /// Every column a table must carry, in header order.
    pub const REQUIRED: [Column; 5] = [
        Column::Close,
        Column::RCombined,
        Column::Strain,
        Column::Capacity,
        Column::Rho,
    ];

    /// Header name as written by the engine.
    pub fn name(self) -> &'static str {
        match self {
            Column::Close => "close",
            Column::RCombined => "r_combined",
            Column::Strain => "strain",
            Column::Capacity => "capacity",
            Column::Rho => "rho",
        }
    }
}

/// Header name of the optional date column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Header name of the optional confirmed-event flag.
pub const CONFIRMED_COLUMN: &str = "confirmed";

// ---------------------------------------------------------------------------
// Observation – one CSV record
// ---------------------------------------------------------------------------

/// A single row of the engine output.
///
/// Blank or non-numeric cells deserialize to `None` instead of failing the
/// whole file; numeric gaps become `NaN` in the table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Observation {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub r_combined: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub strain: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub capacity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub rho: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub confirmed: Option<f64>,
}

// ---------------------------------------------------------------------------
// TimeSeriesTable – the complete loaded series
// ---------------------------------------------------------------------------

/// Column-oriented, immutable view of the engine output.
///
/// Every column has exactly [`len`](Self::len) entries; the fields are private
/// so that invariant holds from construction onwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    close: Vec<f64>,
    r_combined: Vec<f64>,
    strain: Vec<f64>,
    capacity: Vec<f64>,
    rho: Vec<f64>,
    timestamp: Option<Vec<Option<String>>>,
    confirmed: Option<Vec<f64>>,
}

impl TimeSeriesTable {
    /// Build the table from row records.
    ///
    /// `has_timestamp` / `has_confirmed` say whether the optional columns were
    /// present in the header; a present column with blank cells is kept, an
    /// absent one is `None`.
    pub fn from_observations(
        rows: Vec<Observation>,
        has_timestamp: bool,
        has_confirmed: bool,
    ) -> Self {
        let n = rows.len();
        let mut table = TimeSeriesTable {
            close: Vec::with_capacity(n),
            r_combined: Vec::with_capacity(n),
            strain: Vec::with_capacity(n),
            capacity: Vec::with_capacity(n),
            rho: Vec::with_capacity(n),
            timestamp: has_timestamp.then(|| Vec::with_capacity(n)),
            confirmed: has_confirmed.then(|| Vec::with_capacity(n)),
        };

        for row in rows {
            table.close.push(row.close.unwrap_or(f64::NAN));
            table.r_combined.push(row.r_combined.unwrap_or(f64::NAN));
            table.strain.push(row.strain.unwrap_or(f64::NAN));
            table.capacity.push(row.capacity.unwrap_or(f64::NAN));
            table.rho.push(row.rho.unwrap_or(f64::NAN));
            if let Some(ts) = table.timestamp.as_mut() {
                ts.push(row.timestamp.filter(|s| !s.trim().is_empty()));
            }
            if let Some(flags) = table.confirmed.as_mut() {
                flags.push(row.confirmed.unwrap_or(0.0));
            }
        }
        table
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Values of a required column.
    pub fn column(&self, column: Column) -> &[f64] {
        match column {
            Column::Close => &self.close,
            Column::RCombined => &self.r_combined,
            Column::Strain => &self.strain,
            Column::Capacity => &self.capacity,
            Column::Rho => &self.rho,
        }
    }

    /// Raw `timestamp` cells, if the column exists.
    pub fn timestamps(&self) -> Option<&[Option<String>]> {
        self.timestamp.as_deref()
    }

    /// `confirmed` flags, if the column exists.
    pub fn confirmed(&self) -> Option<&[f64]> {
        self.confirmed.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Row with all required values set and no optional columns.
    pub fn row(close: f64, r_combined: f64, strain: f64, capacity: f64, rho: f64) -> Observation {
        Observation {
            close: Some(close),
            r_combined: Some(r_combined),
            strain: Some(strain),
            capacity: Some(capacity),
            rho: Some(rho),
            ..Observation::default()
        }
    }

    /// The two-row series used throughout the tests: row 1 is confirmed.
    pub fn two_rows(timestamps: Option<[&str; 2]>) -> TimeSeriesTable {
        let mut rows = vec![row(100.0, 0.1, 0.2, 1.0, 0.3), row(101.0, 0.4, 0.9, 1.0, 0.95)];
        rows[0].confirmed = Some(0.0);
        rows[1].confirmed = Some(1.0);
        if let Some(ts) = timestamps {
            for (row, value) in rows.iter_mut().zip(ts) {
                row.timestamp = Some(value.to_string());
            }
        }
        TimeSeriesTable::from_observations(rows, timestamps.is_some(), true)
    }
}
