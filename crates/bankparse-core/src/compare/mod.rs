pub mod reference;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Table;

/// Rows logged from each table when comparing.
pub const PREVIEW_ROWS: usize = 5;

/// Outcome of comparing a parsed table with the reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub equal: bool,
    pub parsed: Table,
    pub expected: Table,
    /// First difference found, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    Columns {
        parsed: Vec<String>,
        expected: Vec<String>,
    },
    RowCount {
        parsed: usize,
        expected: usize,
    },
    Cell {
        row: usize,
        column: String,
        parsed: String,
        expected: String,
        /// Both values are the same number written differently ("100.00" vs "100").
        numeric_equivalent: bool,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Columns { parsed, expected } => write!(
                f,
                "column names differ: parsed [{}], expected [{}]",
                parsed.join(", "),
                expected.join(", ")
            ),
            Mismatch::RowCount { parsed, expected } => {
                write!(f, "row count differs: parsed {parsed}, expected {expected}")
            }
            Mismatch::Cell {
                row,
                column,
                parsed,
                expected,
                numeric_equivalent,
            } => {
                write!(
                    f,
                    "row {row}, column '{column}': parsed '{parsed}', expected '{expected}'"
                )?;
                if *numeric_equivalent {
                    write!(f, " (same amount, different formatting)")?;
                }
                Ok(())
            }
        }
    }
}

/// Compare a parsed table with the reference table.
///
/// Equality is exact on string contents: same column names in the same
/// order, same row count, same cell text at every position. A missing cell
/// compares as an empty string.
pub fn compare(parsed: &Table, expected: &Table) -> ComparisonResult {
    debug!(expected_columns = ?expected.columns, parsed_columns = ?parsed.columns, "comparing tables");
    for (i, row) in expected.head(PREVIEW_ROWS).iter().enumerate() {
        debug!(row = i, cells = ?row, "expected");
    }
    for (i, row) in parsed.head(PREVIEW_ROWS).iter().enumerate() {
        debug!(row = i, cells = ?row, "parsed");
    }

    let mismatch = first_mismatch(parsed, expected);
    ComparisonResult {
        equal: mismatch.is_none(),
        parsed: parsed.clone(),
        expected: expected.clone(),
        mismatch,
    }
}

/// Find the first structural difference between two tables, if any.
pub fn first_mismatch(parsed: &Table, expected: &Table) -> Option<Mismatch> {
    if parsed.columns != expected.columns {
        return Some(Mismatch::Columns {
            parsed: parsed.columns.clone(),
            expected: expected.columns.clone(),
        });
    }

    if parsed.rows.len() != expected.rows.len() {
        return Some(Mismatch::RowCount {
            parsed: parsed.rows.len(),
            expected: expected.rows.len(),
        });
    }

    for (row_idx, (p_row, e_row)) in parsed.rows.iter().zip(&expected.rows).enumerate() {
        let width = p_row.len().max(e_row.len());
        for col_idx in 0..width {
            let p = p_row.get(col_idx).map(String::as_str).unwrap_or("");
            let e = e_row.get(col_idx).map(String::as_str).unwrap_or("");
            if p != e {
                return Some(Mismatch::Cell {
                    row: row_idx,
                    column: expected
                        .columns
                        .get(col_idx)
                        .cloned()
                        .unwrap_or_else(|| format!("#{col_idx}")),
                    parsed: p.to_string(),
                    expected: e.to_string(),
                    numeric_equivalent: same_amount(p, e),
                });
            }
        }
    }

    None
}

/// Whether two cells hold the same decimal amount, ignoring thousands separators.
fn same_amount(a: &str, b: &str) -> bool {
    match (parse_amount(a), parse_amount(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: row(columns),
            rows: rows.iter().map(|r| row(r)).collect(),
        }
    }

    fn statement() -> Table {
        table(
            &["Date", "Description", "Debit Amt", "Credit Amt", "Balance"],
            &[
                &["01-08-2024", "Salary", "", "5000.00", "9000.00"],
                &["02-08-2024", "Rent", "3000.00", "", "6000.00"],
            ],
        )
    }

    #[test]
    fn test_reflexive() {
        let t = statement();
        let result = compare(&t, &t);
        assert!(result.equal);
        assert!(result.mismatch.is_none());
    }

    #[test]
    fn test_symmetric() {
        let a = statement();
        let mut b = statement();
        b.rows[1][2] = "3000".into();
        assert_eq!(compare(&a, &b).equal, compare(&b, &a).equal);
        assert!(!compare(&a, &b).equal);

        let c = table(&["col0"], &[&["x"]]);
        assert_eq!(compare(&a, &c).equal, compare(&c, &a).equal);
    }

    #[test]
    fn test_column_order_matters() {
        let a = table(&["A", "B"], &[&["1", "2"]]);
        let b = table(&["B", "A"], &[&["2", "1"]]);
        let result = compare(&a, &b);
        assert!(!result.equal);
        assert!(matches!(result.mismatch, Some(Mismatch::Columns { .. })));
    }

    #[test]
    fn test_row_count_mismatch() {
        let a = statement();
        let mut b = statement();
        b.rows.pop();
        assert_eq!(
            first_mismatch(&a, &b),
            Some(Mismatch::RowCount {
                parsed: 2,
                expected: 1
            })
        );
    }

    #[test]
    fn test_numeric_formatting_is_not_tolerated() {
        let parsed = table(&["Amount"], &[&["100.00"]]);
        let expected = table(&["Amount"], &[&["100"]]);
        let result = compare(&parsed, &expected);
        assert!(!result.equal);
        match result.mismatch {
            Some(Mismatch::Cell {
                row,
                ref column,
                numeric_equivalent,
                ..
            }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "Amount");
                assert!(numeric_equivalent);
            }
            other => panic!("expected cell mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_thousands_separator_hint() {
        assert!(same_amount("1,000.50", "1000.5"));
        assert!(!same_amount("1000", "1001"));
        assert!(!same_amount("", "0"));
        assert!(!same_amount("Salary", "Salary "));
    }

    #[test]
    fn test_missing_cell_equals_empty() {
        let a = table(&["A", "B"], &[&["1"]]);
        let b = table(&["A", "B"], &[&["1", ""]]);
        assert!(compare(&a, &b).equal);
        assert!(compare(&b, &a).equal);
    }

    #[test]
    fn test_mismatch_display() {
        let m = Mismatch::Cell {
            row: 3,
            column: "Balance".into(),
            parsed: "10.0".into(),
            expected: "10".into(),
            numeric_equivalent: true,
        };
        let text = m.to_string();
        assert!(text.contains("row 3"));
        assert!(text.contains("different formatting"));
    }
}
