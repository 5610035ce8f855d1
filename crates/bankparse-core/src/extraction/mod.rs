pub mod lines;
pub mod pdftotext;
pub mod table;

use std::path::Path;

use tracing::debug;

use crate::error::BankparseError;
use crate::model::{Row, Table};
use table::Region;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// A positioned word on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Plain text lines, whitespace alignment preserved.
    pub lines: Vec<String>,
    /// Words with their bounding boxes, used for table detection.
    pub words: Vec<Word>,
}

/// Trait for PDF extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the pages of the PDF at `path`, in document order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageContent>, BankparseError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Extract the raw statement table from a PDF.
///
/// Columns carry positional names; see [`crate::schema::normalize_table`]
/// for the named schema.
pub fn extract_table(document: &Path, extractor: &dyn PdfExtractor) -> Result<Table, BankparseError> {
    let pages = extractor.extract_pages(document)?;
    debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        document = %document.display(),
        "extracted pages"
    );
    let table = Table::from_rows(rows_from_pages(&pages));
    debug!(table = %table, "raw table");
    Ok(table)
}

/// Collect rows page by page, top to bottom.
///
/// On a page with a detected table, table rows are kept whole and
/// digit-bearing lines outside the table are split into cells. A page with
/// no table falls back to its digit-bearing text lines.
pub fn rows_from_pages(pages: &[PageContent]) -> Vec<Row> {
    let mut rows = Vec::new();

    for page in pages {
        let regions = table::segment_page(&page.words);

        if !regions.iter().any(|r| matches!(r, Region::Table(_))) {
            let fallback = lines::split_digit_lines(&page.lines);
            debug!(
                page = page.page_number,
                rows = fallback.len(),
                "no table detected, splitting text lines"
            );
            rows.extend(fallback);
            continue;
        }

        for region in regions {
            match region {
                Region::Table(detected) => {
                    debug!(
                        page = page.page_number,
                        rows = detected.rows.len(),
                        columns = detected.columns.len(),
                        "table detected"
                    );
                    rows.extend(
                        detected
                            .rows
                            .into_iter()
                            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
                            .map(|row| row.iter().map(|cell| cell.trim().to_string()).collect()),
                    );
                }
                Region::Text(line) => rows.extend(lines::split_digit_lines(&[line])),
            }
        }
    }

    rows
}
