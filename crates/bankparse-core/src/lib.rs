pub mod attempt;
pub mod compare;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod schema;

use std::path::Path;

use tracing::info;

use attempt::outcome::RunReport;
use attempt::{AttemptController, AttemptObserver, ControllerConfig};
use config::Settings;
use error::BankparseError;
use extraction::PdfExtractor;
use model::Table;

/// Extract and normalize the transaction table of one statement PDF.
pub fn parse_statement(
    document: &Path,
    extractor: &dyn PdfExtractor,
) -> Result<Table, BankparseError> {
    let raw = extraction::extract_table(document, extractor)?;
    Ok(schema::normalize_table(raw))
}

/// Main API entry point: validate a target's statement against its reference.
///
/// Resolves the target's input paths, fails with `MissingInput` before any
/// attempt if either file is absent, loads the reference table, then runs
/// the attempt controller with the fixed attempt budget.
pub fn run_target(
    settings: &Settings,
    target: &str,
    extractor: &dyn PdfExtractor,
    observer: &mut dyn AttemptObserver,
) -> Result<RunReport, BankparseError> {
    let paths = settings.resolve(target);
    paths.ensure_exist()?;

    info!(
        target = %paths.target,
        document = %paths.document.display(),
        reference = %paths.reference.display(),
        "resolved inputs"
    );

    let reference = compare::reference::load_reference(&paths.reference)?;
    let mut controller = AttemptController::new(&paths.target, ControllerConfig::default(), extractor);
    Ok(controller.run(&paths.document, &reference, observer))
}
