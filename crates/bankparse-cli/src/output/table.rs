use bankparse_core::attempt::outcome::{AttemptOutcome, RunReport};
use bankparse_core::attempt::AttemptObserver;
use bankparse_core::compare::{ComparisonResult, PREVIEW_ROWS};
use bankparse_core::error::BankparseError;
use bankparse_core::model::Table;

/// Prints attempt progress to stdout as it happens.
pub struct ConsoleObserver;

impl AttemptObserver for ConsoleObserver {
    fn on_attempt_start(&mut self, ordinal: u32, routine: &str) {
        println!("\n--- Attempt {} ---", ordinal);
        println!("Using routine {}", routine);
    }

    fn on_extraction_error(&mut self, _ordinal: u32, error: &BankparseError) {
        println!("Error running parser: {}", error);
    }

    fn on_comparison(&mut self, _ordinal: u32, result: &ComparisonResult) {
        print_comparison(result);
        if !result.equal {
            println!("Output does not match the reference CSV. Retrying...");
        }
    }
}

pub fn print_report(report: &RunReport) {
    if report.succeeded() {
        println!(
            "\nSuccess! Parser output matches the reference CSV (attempt {} of {}).",
            report.attempts.len(),
            bankparse_core::attempt::MAX_ATTEMPTS
        );
        return;
    }

    println!(
        "\nFailed to produce a matching table for '{}' after {} attempt(s).",
        report.target,
        report.attempts.len()
    );

    for attempt in &report.attempts {
        let summary = match &attempt.outcome {
            AttemptOutcome::Success => "matched".to_string(),
            AttemptOutcome::ExtractionError { message } => format!("extraction error: {}", message),
            AttemptOutcome::Mismatch { detail: Some(m) } => format!("mismatch: {}", m),
            AttemptOutcome::Mismatch { detail: None } => "mismatch".to_string(),
        };
        println!("  {:>2}. {:<16} {}", attempt.ordinal, attempt.routine, summary);
    }

    match &report.last_comparison {
        Some(comparison) => {
            println!("\nLast comparison:");
            print_comparison(comparison);
        }
        None => println!("\nNo table was extracted; nothing was compared."),
    }
}

fn print_comparison(result: &ComparisonResult) {
    println!("\nExpected columns: {:?}", result.expected.columns);
    println!("Parsed columns:   {:?}", result.parsed.columns);
    println!("\nFirst few expected rows:");
    println!("{}", format_table(&result.expected, Some(PREVIEW_ROWS)));
    println!("\nFirst few parsed rows:");
    println!("{}", format_table(&result.parsed, Some(PREVIEW_ROWS)));
    if let Some(ref mismatch) = result.mismatch {
        println!("\nFirst difference: {}", mismatch);
    }
}

/// Render a table with an index column and aligned cells.
///
/// With `max_rows`, only the leading rows are shown and the rest summarized.
pub fn format_table(table: &Table, max_rows: Option<usize>) -> String {
    if table.columns.is_empty() {
        return format!("(empty table, {} row(s))", table.len());
    }

    let shown = match max_rows {
        Some(n) => table.head(n),
        None => &table.rows[..],
    };

    let index_width = shown.len().saturating_sub(1).to_string().len();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            shown
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (name, width) in table.columns.iter().zip(&widths) {
        out.push_str(&format!("  {:<width$}", name, width = *width));
    }

    for (i, row) in shown.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{:>width$}", i, width = index_width));
        for (col, width) in widths.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            out.push_str(&format!("  {:<width$}", cell, width = *width));
        }
    }

    let hidden = table.len() - shown.len();
    if hidden > 0 {
        out.push_str(&format!("\n... {} more row(s)", hidden));
    }

    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}
