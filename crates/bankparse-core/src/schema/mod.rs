pub mod columns;

use tracing::debug;

use crate::model::Table;
use columns::{assign_names, rename_column, DATE_COLUMN};

/// Give a raw extracted table its named schema.
///
/// Steps:
/// 1. Name columns by width (canonical names at width 5, `colN` otherwise)
/// 2. Rename withdrawal/deposit synonyms to the reference names
/// 3. Drop repeated header rows (a "Date" cell under the Date column)
/// 4. Trim whitespace in every cell
///
/// Normalizing a normalized table returns it unchanged.
pub fn normalize_table(mut table: Table) -> Table {
    table.columns = assign_names(table.width())
        .iter()
        .map(|name| rename_column(name))
        .collect();

    if let Some(idx) = table.column_index(DATE_COLUMN) {
        let before = table.rows.len();
        table
            .rows
            .retain(|row| row.get(idx).map(String::as_str) != Some(DATE_COLUMN));
        let dropped = before - table.rows.len();
        if dropped > 0 {
            debug!(dropped, "removed repeated header rows");
        }
    }

    for cell in table.rows.iter_mut().flatten() {
        let trimmed = cell.trim();
        if trimmed.len() != cell.len() {
            *cell = trimmed.to_string();
        }
    }

    table
}
