use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BankparseError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("missing input: {}", describe_missing(.missing))]
    MissingInput { missing: Vec<(InputKind, PathBuf)> },

    #[error("failed to read reference table {path}: {reason}")]
    Reference { path: PathBuf, reason: String },

    #[error("failed to load settings from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid settings: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Which of the two run inputs is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Document,
    Reference,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Document => write!(f, "PDF document"),
            InputKind::Reference => write!(f, "reference CSV"),
        }
    }
}

fn describe_missing(missing: &[(InputKind, PathBuf)]) -> String {
    missing
        .iter()
        .map(|(kind, path)| format!("{} at {}", kind, path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
