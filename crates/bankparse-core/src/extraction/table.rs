//! Reconstruct grid-like tables from positioned words.
//!
//! Words are grouped into visual lines and lines are split into cells at
//! wide horizontal gaps. A table spans consecutive multi-cell lines plus any
//! single-cell lines between them, up to a large vertical gap. Column bands
//! come from the lines with the most cells; every cell goes to its nearest
//! band. Lines outside a table are returned as plain text.

use crate::extraction::Word;
use crate::model::Row;

const MIN_TABLE_ROWS: usize = 2;
const MIN_TABLE_COLUMNS: usize = 2;
/// Share of grid slots on multi-cell lines that must hold text.
const MIN_FILL_RATIO: f32 = 0.5;
/// Cell break threshold, as a multiple of the median word height.
const CELL_GAP_FACTOR: f32 = 1.0;
/// Vertical gap that ends a table, as a multiple of the median word height.
const TABLE_BREAK_FACTOR: f32 = 2.0;

/// A page section, top to bottom.
#[derive(Debug, Clone)]
pub enum Region {
    Table(DetectedTable),
    /// A line outside any table, cells joined by two spaces.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct DetectedTable {
    pub columns: Vec<ColumnBand>,
    pub rows: Vec<Row>,
}

/// Horizontal extent of one table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBand {
    pub x_min: f32,
    pub x_max: f32,
}

impl ColumnBand {
    fn distance(&self, x: f32) -> f32 {
        if x < self.x_min {
            self.x_min - x
        } else if x > self.x_max {
            x - self.x_max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
struct Cell {
    text: String,
    x_min: f32,
    x_max: f32,
}

impl Cell {
    fn center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }
}

#[derive(Debug, Clone)]
struct VisualLine {
    cells: Vec<Cell>,
    y_min: f32,
    y_max: f32,
}

impl VisualLine {
    fn is_multi_cell(&self) -> bool {
        self.cells.len() >= MIN_TABLE_COLUMNS
    }

    fn text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Split a page into tables and loose text lines, top to bottom.
pub fn segment_page(words: &[Word]) -> Vec<Region> {
    if words.is_empty() {
        return Vec::new();
    }

    let height = median_height(words);
    let lines: Vec<VisualLine> = group_visual_lines(words)
        .iter()
        .map(|line| visual_line(line, height * CELL_GAP_FACTOR))
        .collect();

    let mut regions = Vec::new();
    // Starts and ends with a multi-cell line.
    let mut run: Vec<&VisualLine> = Vec::new();
    // Single-cell lines seen since the last multi-cell line of `run`.
    let mut pending: Vec<&VisualLine> = Vec::new();
    let mut prev_bottom: Option<f32> = None;

    for line in &lines {
        let far = prev_bottom.is_some_and(|b| line.y_min - b > height * TABLE_BREAK_FACTOR);
        prev_bottom = Some(line.y_max);
        if far {
            flush(&mut regions, &mut run, &mut pending);
        }

        if line.is_multi_cell() {
            run.append(&mut pending);
            run.push(line);
        } else if run.is_empty() {
            regions.push(Region::Text(line.text()));
        } else {
            pending.push(line);
        }
    }
    flush(&mut regions, &mut run, &mut pending);

    regions
}

fn flush<'a>(
    regions: &mut Vec<Region>,
    run: &mut Vec<&'a VisualLine>,
    pending: &mut Vec<&'a VisualLine>,
) {
    match build_table(run) {
        Some(table) => regions.push(Region::Table(table)),
        None => regions.extend(run.iter().map(|l| Region::Text(l.text()))),
    }
    regions.extend(pending.iter().map(|l| Region::Text(l.text())));
    run.clear();
    pending.clear();
}

fn median_height(words: &[Word]) -> f32 {
    let mut heights: Vec<f32> = words.iter().map(|w| w.bbox.height()).collect();
    heights.sort_by(f32::total_cmp);
    heights[heights.len() / 2].max(f32::EPSILON)
}

/// Group words into lines by vertical overlap, each line sorted left to right.
fn group_visual_lines(words: &[Word]) -> Vec<Vec<&Word>> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.bbox.center_y().total_cmp(&b.bbox.center_y()));

    let mut lines: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        let cy = word.bbox.center_y();
        if let Some(line) = lines
            .last_mut()
            .filter(|line| line.first().is_some_and(|f| cy >= f.bbox.y_min && cy <= f.bbox.y_max))
        {
            line.push(word);
            continue;
        }
        lines.push(vec![word]);
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
    }
    lines
}

fn visual_line(words: &[&Word], gap: f32) -> VisualLine {
    let mut cells: Vec<Cell> = Vec::new();

    for word in words {
        if let Some(cell) = cells
            .last_mut()
            .filter(|cell| word.bbox.x_min - cell.x_max < gap)
        {
            cell.text.push(' ');
            cell.text.push_str(&word.text);
            cell.x_max = cell.x_max.max(word.bbox.x_max);
            continue;
        }
        cells.push(Cell {
            text: word.text.clone(),
            x_min: word.bbox.x_min,
            x_max: word.bbox.x_max,
        });
    }

    VisualLine {
        cells,
        y_min: words.iter().map(|w| w.bbox.y_min).fold(f32::INFINITY, f32::min),
        y_max: words.iter().map(|w| w.bbox.y_max).fold(f32::NEG_INFINITY, f32::max),
    }
}

fn build_table(run: &[&VisualLine]) -> Option<DetectedTable> {
    let grid_lines = run.iter().filter(|l| l.is_multi_cell()).count();
    if grid_lines < MIN_TABLE_ROWS {
        return None;
    }

    let columns = column_bands(run);
    if columns.len() < MIN_TABLE_COLUMNS {
        return None;
    }

    let mut filled = 0usize;
    let mut rows = Vec::with_capacity(run.len());
    for line in run {
        let mut row = vec![String::new(); columns.len()];
        for cell in &line.cells {
            let slot = &mut row[nearest_band(&columns, cell.center())];
            if slot.is_empty() {
                if line.is_multi_cell() {
                    filled += 1;
                }
            } else {
                slot.push(' ');
            }
            slot.push_str(cell.text.trim());
        }
        rows.push(row);
    }

    let fill_ratio = filled as f32 / (grid_lines * columns.len()) as f32;
    if fill_ratio < MIN_FILL_RATIO {
        return None;
    }

    Some(DetectedTable { columns, rows })
}

/// Merge the cell extents of the lines with the most cells into column
/// bands, left to right. Narrower lines such as preambles or rows with
/// empty cells do not shape the bands.
fn column_bands(run: &[&VisualLine]) -> Vec<ColumnBand> {
    let widest = run.iter().map(|l| l.cells.len()).max().unwrap_or(0);
    let mut spans: Vec<ColumnBand> = run
        .iter()
        .filter(|l| l.cells.len() == widest)
        .flat_map(|l| l.cells.iter())
        .map(|c| ColumnBand {
            x_min: c.x_min,
            x_max: c.x_max,
        })
        .collect();
    spans.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));

    let mut bands: Vec<ColumnBand> = Vec::new();
    for span in spans {
        if let Some(band) = bands.last_mut().filter(|band| span.x_min <= band.x_max) {
            band.x_max = band.x_max.max(span.x_max);
            continue;
        }
        bands.push(span);
    }
    bands
}

fn nearest_band(bands: &[ColumnBand], x: f32) -> usize {
    bands
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance(x).total_cmp(&b.distance(x)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

    fn word(text: &str, x: f32, y: f32) -> Word {
        Word {
            text: text.to_string(),
            bbox: BBox {
                x_min: x,
                y_min: y,
                x_max: x + 5.0 * text.len() as f32,
                y_max: y + 10.0,
            },
        }
    }

    fn tables(regions: &[Region]) -> Vec<&DetectedTable> {
        regions
            .iter()
            .filter_map(|r| match r {
                Region::Table(t) => Some(t),
                Region::Text(_) => None,
            })
            .collect()
    }

    fn texts(regions: &[Region]) -> Vec<&str> {
        regions
            .iter()
            .filter_map(|r| match r {
                Region::Text(t) => Some(t.as_str()),
                Region::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_detects_aligned_grid() {
        let words = vec![
            word("Date", 0.0, 0.0),
            word("Description", 100.0, 0.0),
            word("Balance", 250.0, 0.0),
            word("01-08-2024", 0.0, 14.0),
            word("NEFT", 100.0, 14.0),
            word("Salary", 125.0, 14.0),
            word("5000.00", 250.0, 14.0),
            word("02-08-2024", 0.0, 28.0),
            word("4100.00", 250.0, 28.0),
        ];

        let regions = segment_page(&words);
        let found = tables(&regions);
        assert_eq!(found.len(), 1);
        let table = found[0];
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[0], vec!["Date", "Description", "Balance"]);
        // Words closer than the gap threshold stay in one cell
        assert_eq!(table.rows[1], vec!["01-08-2024", "NEFT Salary", "5000.00"]);
        // Missing cells become empty strings
        assert_eq!(table.rows[2], vec!["02-08-2024", "", "4100.00"]);
    }

    #[test]
    fn test_single_cell_lines_stay_inside_table() {
        let words = vec![
            word("Date", 0.0, 0.0),
            word("Description", 100.0, 0.0),
            word("Balance", 250.0, 0.0),
            word("01-08-2024", 0.0, 14.0),
            word("NEFT", 100.0, 14.0),
            word("5000.00", 250.0, 14.0),
            word("SALARY", 100.0, 28.0),
            word("03-08-2024", 0.0, 42.0),
            word("ATM", 100.0, 42.0),
            word("3000.00", 250.0, 42.0),
        ];

        let regions = segment_page(&words);
        assert_eq!(regions.len(), 1);
        let table = tables(&regions)[0];
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[2], vec!["", "SALARY", ""]);
        assert_eq!(table.rows[3], vec!["03-08-2024", "ATM", "3000.00"]);
    }

    #[test]
    fn test_narrow_preamble_does_not_merge_columns() {
        let words = vec![
            // One wide cell across the first two columns, one on the right
            word("Account", 0.0, 0.0),
            word("holder:", 40.0, 0.0),
            word("RAVI", 80.0, 0.0),
            word("KUMAR", 105.0, 0.0),
            word("SHARMA", 135.0, 0.0),
            word("A/c", 250.0, 0.0),
            word("00123", 270.0, 0.0),
            word("Date", 0.0, 14.0),
            word("Description", 100.0, 14.0),
            word("Balance", 250.0, 14.0),
            word("01-08-2024", 0.0, 28.0),
            word("NEFT", 100.0, 28.0),
            word("5000.00", 250.0, 28.0),
        ];

        let regions = segment_page(&words);
        let table = tables(&regions)[0];
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[1], vec!["Date", "Description", "Balance"]);
        assert_eq!(table.rows[2], vec!["01-08-2024", "NEFT", "5000.00"]);
    }

    #[test]
    fn test_large_vertical_gap_splits_tables() {
        let words = vec![
            word("a", 0.0, 0.0),
            word("b", 100.0, 0.0),
            word("c", 0.0, 14.0),
            word("d", 100.0, 14.0),
            word("e", 0.0, 200.0),
            word("f", 100.0, 200.0),
            word("g", 0.0, 214.0),
            word("h", 100.0, 214.0),
        ];

        let regions = segment_page(&words);
        let found = tables(&regions);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].rows[0], vec!["e", "f"]);
    }

    #[test]
    fn test_lines_outside_table_become_text() {
        let words = vec![
            word("Statement", 0.0, 0.0),
            word("a", 0.0, 100.0),
            word("b", 100.0, 100.0),
            word("c", 0.0, 114.0),
            word("d", 100.0, 114.0),
            word("Closing", 0.0, 128.0),
            word("9000.00", 100.0, 300.0),
        ];

        let regions = segment_page(&words);
        assert!(matches!(regions[0], Region::Text(ref t) if t == "Statement"));
        assert!(matches!(regions[1], Region::Table(_)));
        // Trailing single-cell lines are not part of the table
        assert_eq!(texts(&regions), vec!["Statement", "Closing", "9000.00"]);
    }

    #[test]
    fn test_prose_is_not_a_table() {
        let words = vec![
            word("Thank", 0.0, 0.0),
            word("you", 30.0, 0.0),
            word("for", 50.0, 0.0),
            word("banking", 70.0, 0.0),
        ];
        let regions = segment_page(&words);
        assert!(tables(&regions).is_empty());
        assert_eq!(texts(&regions), vec!["Thank you for banking"]);
    }

    #[test]
    fn test_lone_multi_cell_line_is_not_a_table() {
        let words = vec![word("Account", 0.0, 0.0), word("1234", 200.0, 0.0)];
        let regions = segment_page(&words);
        assert!(tables(&regions).is_empty());
        assert_eq!(texts(&regions), vec!["Account  1234"]);
    }

    #[test]
    fn test_sparse_grid_rejected() {
        // Rows whose cells never share a column
        let words = vec![
            word("a", 0.0, 0.0),
            word("b", 100.0, 0.0),
            word("c", 200.0, 14.0),
            word("d", 300.0, 14.0),
            word("e", 400.0, 28.0),
            word("f", 500.0, 28.0),
        ];
        let regions = segment_page(&words);
        assert!(tables(&regions).is_empty());
        assert_eq!(texts(&regions).len(), 3);
    }
}
