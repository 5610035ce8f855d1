pub mod outcome;
pub mod routine;

use std::path::Path;

use tracing::{info, warn};

use crate::compare::{compare, ComparisonResult};
use crate::error::BankparseError;
use crate::extraction::PdfExtractor;
use crate::model::Table;
use outcome::{Attempt, AttemptOutcome, ControllerState, RunReport};
use routine::TemplateRoutine;

/// Number of extract-and-compare cycles before giving up.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub max_attempts: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

/// Receives progress events from the attempt controller.
///
/// All methods default to doing nothing.
pub trait AttemptObserver {
    fn on_attempt_start(&mut self, _ordinal: u32, _routine: &str) {}

    fn on_extraction_error(&mut self, _ordinal: u32, _error: &BankparseError) {}

    fn on_comparison(&mut self, _ordinal: u32, _result: &ComparisonResult) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl AttemptObserver for NoopObserver {}

/// Runs the fixed routine against a document until its output matches the
/// reference table or the attempt budget is spent.
///
/// Extraction errors fail the attempt and move on without comparing. Since
/// the routine never changes, retries only help when extraction fails
/// transiently; a systematic mismatch fails every attempt.
pub struct AttemptController<'a> {
    target: String,
    config: ControllerConfig,
    extractor: &'a dyn PdfExtractor,
    state: ControllerState,
}

impl<'a> AttemptController<'a> {
    pub fn new(target: &str, config: ControllerConfig, extractor: &'a dyn PdfExtractor) -> Self {
        AttemptController {
            target: target.to_string(),
            config,
            extractor,
            state: ControllerState::Idle,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn run(
        &mut self,
        document: &Path,
        reference: &Table,
        observer: &mut dyn AttemptObserver,
    ) -> RunReport {
        let mut attempts = Vec::new();
        let mut last_comparison = None;

        for ordinal in 1..=self.config.max_attempts {
            self.state = ControllerState::Attempting(ordinal);
            let routine = TemplateRoutine::materialize(&self.target, self.extractor);
            info!(attempt = ordinal, routine = routine.name(), "starting attempt");
            observer.on_attempt_start(ordinal, routine.name());

            let parsed = match routine.run(document) {
                Ok(table) => table,
                Err(e) => {
                    warn!(attempt = ordinal, error = %e, "extraction failed");
                    observer.on_extraction_error(ordinal, &e);
                    attempts.push(Attempt {
                        ordinal,
                        routine: routine.name().to_string(),
                        outcome: AttemptOutcome::ExtractionError {
                            message: e.to_string(),
                        },
                    });
                    continue;
                }
            };

            let comparison = compare(&parsed, reference);
            observer.on_comparison(ordinal, &comparison);

            let outcome = if comparison.equal {
                AttemptOutcome::Success
            } else {
                AttemptOutcome::Mismatch {
                    detail: comparison.mismatch.clone(),
                }
            };
            attempts.push(Attempt {
                ordinal,
                routine: routine.name().to_string(),
                outcome,
            });

            let equal = comparison.equal;
            last_comparison = Some(comparison);

            if equal {
                info!(attempt = ordinal, "output matches reference");
                self.state = ControllerState::Succeeded;
                return self.report(attempts, last_comparison);
            }
            warn!(attempt = ordinal, "output does not match reference");
        }

        warn!(attempts = attempts.len(), "attempt budget exhausted");
        self.state = ControllerState::ExhaustedFailed;
        self.report(attempts, last_comparison)
    }

    fn report(&self, attempts: Vec<Attempt>, last_comparison: Option<ComparisonResult>) -> RunReport {
        RunReport {
            target: self.target.clone(),
            state: self.state,
            attempts,
            last_comparison,
        }
    }
}
