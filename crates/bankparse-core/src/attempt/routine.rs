use std::path::Path;

use crate::error::BankparseError;
use crate::extraction::{extract_table, PdfExtractor};
use crate::model::Table;
use crate::schema::normalize_table;

/// The fixed extraction routine: extract the raw table, then normalize it.
///
/// A fresh routine is materialized for every attempt. It is identical each
/// time; nothing learned from a failed comparison feeds back into it.
pub struct TemplateRoutine<'a> {
    name: String,
    extractor: &'a dyn PdfExtractor,
}

impl<'a> TemplateRoutine<'a> {
    pub fn materialize(target: &str, extractor: &'a dyn PdfExtractor) -> Self {
        TemplateRoutine {
            name: format!("{}_parser", target),
            extractor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, document: &Path) -> Result<Table, BankparseError> {
        let raw = extract_table(document, self.extractor)?;
        Ok(normalize_table(raw))
    }
}
