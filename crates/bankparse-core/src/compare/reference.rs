use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::BankparseError;
use crate::model::Table;

/// Cell values that denote a missing value and are read as empty strings.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load the expected table from a CSV file.
///
/// The first row is the header. Every value is read as a string and missing
/// value markers such as `NA` or `null` become empty strings. Short rows are
/// padded with empty strings; rows longer than the header are rejected.
pub fn load_reference(path: &Path) -> Result<Table, BankparseError> {
    let file = File::open(path).map_err(|e| BankparseError::Reference {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    read_reference(file, path)
}

/// Read a reference table from any CSV source. `source` is used in errors.
pub fn read_reference<R: Read>(reader: R, source: &Path) -> Result<Table, BankparseError> {
    let fail = |reason: String| BankparseError::Reference {
        path: source.to_path_buf(),
        reason,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(|e| fail(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        return Err(fail("no header row".into()));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| fail(e.to_string()))?;
        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(fail(format!(
                "line {}: expected {} fields, found {}",
                line,
                columns.len(),
                record.len()
            )));
        }
        rows.push(
            record
                .iter()
                .map(|cell| if NA_TOKENS.contains(&cell) { "" } else { cell })
                .map(str::to_string)
                .collect(),
        );
    }

    Ok(Table::with_columns(columns, rows))
}
