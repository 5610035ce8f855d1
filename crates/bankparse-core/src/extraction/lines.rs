use crate::model::Row;

/// Turn plain text lines into rows.
///
/// Only lines containing at least one ASCII digit are kept. Each kept line is
/// trimmed and split on runs of two or more whitespace characters.
pub fn split_digit_lines(lines: &[String]) -> Vec<Row> {
    lines
        .iter()
        .filter(|line| line.chars().any(|c| c.is_ascii_digit()))
        .map(|line| {
            split_by_whitespace_gaps(line.trim())
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Split a line by gaps of 2+ whitespace characters.
///
/// Single spaces stay inside a field. A gap at either end of the line
/// yields an empty leading or trailing field.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut seg_start = 0;
    let mut gap_start = 0;
    let mut gap_len = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if gap_len == 0 {
                gap_start = i;
            }
            gap_len += 1;
        } else {
            if gap_len >= 2 {
                segments.push(&line[seg_start..gap_start]);
                seg_start = i;
            }
            gap_len = 0;
        }
    }

    if gap_len >= 2 {
        segments.push(&line[seg_start..gap_start]);
        segments.push("");
    } else {
        segments.push(&line[seg_start..]);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("01-08-2024  NEFT Salary   5,000.00  12,500.00");
        assert_eq!(
            segments,
            vec!["01-08-2024", "NEFT Salary", "5,000.00", "12,500.00"]
        );
    }

    #[test]
    fn test_single_spaces_are_kept() {
        assert_eq!(split_by_whitespace_gaps("UPI to cafe 42"), vec!["UPI to cafe 42"]);
    }

    #[test]
    fn test_tabs_count_as_whitespace() {
        assert_eq!(split_by_whitespace_gaps("a\t\tb \tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edge_gaps_give_empty_fields() {
        assert_eq!(split_by_whitespace_gaps("  a"), vec!["", "a"]);
        assert_eq!(split_by_whitespace_gaps("a  "), vec!["a", ""]);
    }

    #[test]
    fn test_split_digit_lines_skips_lines_without_digits() {
        let lines = vec![
            "Date        Description      Balance".to_string(),
            "".to_string(),
            "   01-08-2024   ATM withdrawal   900.00   ".to_string(),
        ];
        let rows = split_digit_lines(&lines);
        assert_eq!(rows, vec![vec!["01-08-2024", "ATM withdrawal", "900.00"]]);
    }

    #[test]
    fn test_numeric_symbols_are_not_digits() {
        let lines = vec!["Share ½ of Ⅻ".to_string(), "Page 2".to_string()];
        assert_eq!(split_digit_lines(&lines), vec![vec!["Page 2"]]);
    }
}
