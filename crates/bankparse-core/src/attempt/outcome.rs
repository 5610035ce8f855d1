use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonResult, Mismatch};

/// Where the attempt controller is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Attempting(u32),
    Succeeded,
    ExhaustedFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    /// The routine could not read the document; no comparison was made.
    ExtractionError { message: String },
    /// The routine produced a table that differs from the reference.
    Mismatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<Mismatch>,
    },
}

/// Record of one extract-and-compare cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based attempt number.
    pub ordinal: u32,
    /// Name of the routine that ran.
    pub routine: String,
    pub outcome: AttemptOutcome,
}

/// Result of a full controller run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub target: String,
    pub state: ControllerState,
    pub attempts: Vec<Attempt>,
    /// Last comparison performed, kept for the final diagnostic dump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_comparison: Option<ComparisonResult>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.state == ControllerState::Succeeded
    }

    /// Number of attempts that reached the comparison step.
    pub fn comparisons(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| !matches!(a.outcome, AttemptOutcome::ExtractionError { .. }))
            .count()
    }
}
