use serde::{Deserialize, Serialize};
use std::fmt;

/// One positional record of cell strings. Empty cells are empty strings.
pub type Row = Vec<String>;

/// A rectangular table of string cells with ordered column names.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from raw rows of possibly different widths.
    ///
    /// The table is as wide as its widest row; shorter rows are padded with
    /// empty strings. Columns get positional names until a schema is applied.
    pub fn from_rows(rows: Vec<Row>) -> Table {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Table {
            columns: positional_names(width),
            rows,
        }
    }

    /// Build a table with known column names. Rows are padded or cut to fit.
    pub fn with_columns(columns: Vec<String>, rows: Vec<Row>) -> Table {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Table { columns, rows }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} row(s) x [{}]", self.len(), self.columns.join(", "))
    }
}

/// Generic column names `col0..col(n-1)`.
pub fn positional_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("col{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_rows_pads_to_widest() {
        let table = Table::from_rows(vec![row(&["a", "b"]), row(&["c", "d", "e"])]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.columns, vec!["col0", "col1", "col2"]);
        assert_eq!(table.rows[0], row(&["a", "b", ""]));
    }

    #[test]
    fn test_from_no_rows_is_zero_wide() {
        let table = Table::from_rows(Vec::new());
        assert_eq!(table.width(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_with_columns_fits_rows() {
        let table = Table::with_columns(
            vec!["A".into(), "B".into()],
            vec![row(&["1"]), row(&["1", "2", "3"])],
        );
        assert_eq!(table.rows, vec![row(&["1", ""]), row(&["1", "2"])]);
    }

    #[test]
    fn test_head_is_bounded() {
        let table = Table::from_rows(vec![row(&["a"]), row(&["b"])]);
        assert_eq!(table.head(5).len(), 2);
        assert_eq!(table.head(1), &[row(&["a"])]);
    }
}
