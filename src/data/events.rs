use super::model::TimeSeriesTable;

// ---------------------------------------------------------------------------
// EventMask – rows flagged as confirmed ruptures
// ---------------------------------------------------------------------------

/// Per-row flag, true where `confirmed == 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMask(Vec<bool>);

impl EventMask {
    /// Derive the mask from the `confirmed` column.
    ///
    /// A table without that column yields an all-false mask of the same length.
    pub fn from_table(table: &TimeSeriesTable) -> Self {
        match table.confirmed() {
            Some(flags) => EventMask(flags.iter().map(|&flag| flag == 1.0).collect()),
            None => EventMask(vec![false; table.len()]),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of flagged rows.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag).count()
    }

    /// Indices of flagged rows, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &flag)| flag)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_support::{row, two_rows};

    #[test]
    fn flags_only_rows_confirmed_as_one() {
        let mut rows = vec![row(1.0, 0.0, 0.0, 1.0, 0.0); 4];
        rows[0].confirmed = Some(1.0);
        rows[1].confirmed = Some(0.0);
        rows[2].confirmed = Some(2.0);
        rows[3].confirmed = Some(1.0);
        let table = TimeSeriesTable::from_observations(rows, false, true);
        let mask = EventMask::from_table(&table);

        assert_eq!(mask.len(), 4);
        assert_eq!(mask.count(), 2);
        assert_eq!(mask.indices().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn absent_column_is_all_false() {
        let rows = vec![row(1.0, 0.0, 0.0, 1.0, 0.0); 3];
        let table = TimeSeriesTable::from_observations(rows, false, false);
        let mask = EventMask::from_table(&table);

        assert_eq!(mask.len(), 3);
        assert_eq!(mask.count(), 0);
        assert_eq!(mask.indices().next(), None);
    }

    #[test]
    fn example_series_flags_second_row() {
        let mask = EventMask::from_table(&two_rows(None));
        assert_eq!(mask.indices().collect::<Vec<_>>(), vec![1]);
    }
}
