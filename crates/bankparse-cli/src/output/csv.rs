use bankparse_core::error::BankparseError;
use bankparse_core::model::Table;

/// Render a table as CSV, header row first.
pub fn render(table: &Table) -> Result<String, BankparseError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_quotes_commas() {
        let table = Table {
            columns: vec!["Date".into(), "Description".into()],
            rows: vec![vec!["01-08-2024".into(), "Rent, August".into()]],
        };
        assert_eq!(
            render(&table).unwrap(),
            "Date,Description\n01-08-2024,\"Rent, August\"\n"
        );
    }
}
