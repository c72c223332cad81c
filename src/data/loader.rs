use std::path::Path;

use crate::error::PlotError;

use super::model::{Column, Observation, TimeSeriesTable, CONFIRMED_COLUMN, TIMESTAMP_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an engine time series from a delimited text file with a header row.
///
/// The header is checked once for the required columns; after that every
/// record is deserialized into an [`Observation`]. Columns the plot does not
/// use are ignored.
pub fn load_file(path: &Path) -> Result<TimeSeriesTable, PlotError> {
    if !path.exists() {
        return Err(PlotError::InputMissing(Some(path.to_path_buf())));
    }

    let read_err = |source: csv::Error| PlotError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(PlotError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }
    let has_timestamp = headers.iter().any(|h| h == TIMESTAMP_COLUMN);
    let has_confirmed = headers.iter().any(|h| h == CONFIRMED_COLUMN);

    let rows = reader
        .deserialize::<Observation>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;

    log::info!(
        "Loaded {} rows from {} (timestamp: {has_timestamp}, confirmed: {has_confirmed})",
        rows.len(),
        path.display()
    );

    Ok(TimeSeriesTable::from_observations(
        rows,
        has_timestamp,
        has_confirmed,
    ))
}

/// Required column names absent from `headers`, in canonical order.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    Column::REQUIRED
        .iter()
        .map(|c| c.name())
        .filter(|name| !headers.iter().any(|h| h == name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::events::EventMask;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_engine_output_ignoring_extra_columns() {
        let file = csv_file(
            "timestamp,close,volume,r_combined,strain,capacity,rho,state,candidate,confirmed\n\
             2024-01-01,100.0,5000,0.1,0.2,1.0,0.3,Stable,0,0\n\
             2024-01-02,101.0,6000,0.4,0.9,1.0,0.95,Critical,1,1\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column(Column::Close), &[100.0, 101.0]);
        assert_eq!(table.column(Column::Rho), &[0.3, 0.95]);
        assert_eq!(table.confirmed(), Some(&[0.0, 1.0][..]));
        assert_eq!(table.timestamps().map(|t| t.len()), Some(2));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let file = csv_file("close,r_combined,strain,capacity,rho\n1,2,3,4,5\n");
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.timestamps().is_none());
        assert!(table.confirmed().is_none());
    }

    #[test]
    fn blank_numeric_cells_become_gaps() {
        let file = csv_file("close,r_combined,strain,capacity,rho,confirmed\n1,,3,4,n/a,\n");
        let table = load_file(file.path()).unwrap();

        assert!(table.column(Column::RCombined)[0].is_nan());
        assert!(table.column(Column::Rho)[0].is_nan());
        assert_eq!(table.confirmed(), Some(&[0.0][..]));
    }

    #[test]
    fn float_formatted_flags_are_read() {
        let file = csv_file("close,r_combined,strain,capacity,rho,confirmed\n1,2,3,4,5,1.0\n1,2,3,4,5,0.0\n");
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.confirmed(), Some(&[1.0, 0.0][..]));
        assert_eq!(EventMask::from_table(&table).count(), 1);
    }

    #[test]
    fn missing_required_columns_are_named() {
        let file = csv_file("timestamp,close,r_combined,capacity\n2024-01-01,1,2,3\n");
        let err = load_file(file.path()).unwrap_err();

        match err {
            PlotError::Schema { missing, .. } => assert_eq!(missing, ["strain", "rho"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn nonexistent_path_is_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        assert!(matches!(
            load_file(&path),
            Err(PlotError::InputMissing(Some(p))) if p == path
        ));
    }

    #[test]
    fn ragged_rows_are_read_errors() {
        let file = csv_file("close,r_combined,strain,capacity,rho\n1,2,3,4,5\n1,2\n");
        assert!(matches!(load_file(file.path()), Err(PlotError::Read { .. })));
    }
}
