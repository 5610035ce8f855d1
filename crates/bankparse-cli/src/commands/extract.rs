use bankparse_core::error::{BankparseError, InputKind};
use bankparse_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), BankparseError> {
    if !pdf_file.is_file() {
        return Err(BankparseError::MissingInput {
            missing: vec![(InputKind::Document, pdf_file)],
        });
    }

    let extractor = PdftotextExtractor::new();
    let table = bankparse_core::parse_statement(&pdf_file, &extractor)?;

    let output_str = match output_format {
        "json" => serde_json::to_string_pretty(&table)?,
        "csv" => output::csv::render(&table)?,
        _ => output::table::format_table(&table, None),
    };

    match output_file {
        Some(path) => {
            std::fs::write(&path, output_str)?;
            eprintln!(
                "Extracted {} row(s) x {} column(s), written to {}",
                table.len(),
                table.width(),
                path.display()
            );
        }
        None => {
            println!("{output_str}");
        }
    }

    Ok(())
}
