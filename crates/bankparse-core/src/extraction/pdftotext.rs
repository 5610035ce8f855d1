use std::path::Path;
use std::process::Command;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::BankparseError;
use crate::extraction::{BBox, PageContent, PdfExtractor, Word};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Text comes from `pdftotext -layout`, which preserves column alignment
/// with spaces. Word boxes for table detection come from
/// `pdftotext -bbox-layout`.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageContent>, BankparseError> {
        let text = run_pdftotext(path, "-layout")?;
        let xml = run_pdftotext(path, "-bbox-layout")?;
        let mut words_by_page = parse_bbox_words(&xml)?;

        // Pages are separated by form feed (\x0c)
        let pages = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                lines: page_text.lines().map(|l| l.to_string()).collect(),
                words: words_by_page
                    .get_mut(i)
                    .map(std::mem::take)
                    .unwrap_or_default(),
            })
            .filter(|p| !p.lines.is_empty() || !p.words.is_empty())
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path, mode: &str) -> Result<String, BankparseError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BankparseError::PdftotextNotFound
            } else {
                BankparseError::Extraction(format!("pdftotext {} failed: {}", mode, e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(BankparseError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pdftotext -bbox-layout` XHTML into the words of each page.
fn parse_bbox_words(xml: &str) -> Result<Vec<Vec<Word>>, BankparseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Word>> = Vec::new();
    let mut open_word: Option<BBox> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"word" => {
                    open_word = Some(parse_bbox(&e)?);
                    text.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"page" => pages.push(Vec::new()),
            Ok(Event::Text(t)) if open_word.is_some() => {
                let decoded = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                text.push_str(&decoded);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"word" => {
                if let (Some(bbox), Some(page)) = (open_word.take(), pages.last_mut()) {
                    let word = text.trim();
                    if !word.is_empty() {
                        page.push(Word {
                            text: word.to_string(),
                            bbox,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BankparseError::Extraction(format!(
                    "malformed bbox output at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_bbox(tag: &BytesStart) -> Result<BBox, BankparseError> {
    Ok(BBox {
        x_min: parse_attr_f32(tag, "xMin")?,
        y_min: parse_attr_f32(tag, "yMin")?,
        x_max: parse_attr_f32(tag, "xMax")?,
        y_max: parse_attr_f32(tag, "yMax")?,
    })
}

fn parse_attr_f32(tag: &BytesStart, name: &str) -> Result<f32, BankparseError> {
    let attr = tag
        .try_get_attribute(name)
        .map_err(|e| BankparseError::Extraction(format!("bad attribute '{}': {}", name, e)))?
        .ok_or_else(|| BankparseError::Extraction(format!("word without '{}' attribute", name)))?;
    let value = String::from_utf8_lossy(&attr.value);
    value
        .trim()
        .parse()
        .map_err(|e| BankparseError::Extraction(format!("invalid {} '{}': {}", name, value, e)))
}
