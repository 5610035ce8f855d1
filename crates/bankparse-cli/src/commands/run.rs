use bankparse_core::attempt::NoopObserver;
use bankparse_core::config::{load_settings, Settings};
use bankparse_core::error::BankparseError;
use bankparse_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;
use crate::output::table::ConsoleObserver;

pub fn run(
    target: &str,
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    output_format: &str,
) -> Result<(), BankparseError> {
    let mut settings = match config {
        Some(path) => load_settings(&path)?,
        None => Settings::default(),
    };
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }

    let extractor = PdftotextExtractor::new();

    match output_format {
        "json" => {
            let report = bankparse_core::run_target(&settings, target, &extractor, &mut NoopObserver)?;
            output::json::print(&report)?;
        }
        _ => {
            let report =
                bankparse_core::run_target(&settings, target, &extractor, &mut ConsoleObserver)?;
            output::table::print_report(&report);
        }
    }

    Ok(())
}
