use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::positional_names;

/// Row width of the statement layout this tool understands.
pub const CANONICAL_WIDTH: usize = 5;

/// Positional names for a table of [`CANONICAL_WIDTH`] columns.
pub const CANONICAL_COLUMNS: [&str; CANONICAL_WIDTH] =
    ["Date", "Description", "Withdrawal", "Deposit", "Balance"];

pub const DATE_COLUMN: &str = "Date";

/// Assign column names by width: the canonical names for a 5-wide table,
/// `col0..col(n-1)` for anything else.
pub fn assign_names(width: usize) -> Vec<String> {
    if width == CANONICAL_WIDTH {
        CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else {
        positional_names(width)
    }
}

/// Map a column name to the name used by reference tables.
///
/// Names outside the synonym map pass through unchanged.
pub fn rename_column(name: &str) -> String {
    SYNONYMS.get(name).copied().unwrap_or(name).to_string()
}

static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("Withdrawal", "Debit Amt");
    m.insert("Deposit", "Credit Amt");
    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_width_names() {
        assert_eq!(
            assign_names(5),
            vec!["Date", "Description", "Withdrawal", "Deposit", "Balance"]
        );
    }

    #[test]
    fn test_other_widths_are_positional() {
        assert_eq!(assign_names(3), vec!["col0", "col1", "col2"]);
        assert!(assign_names(0).is_empty());
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(rename_column("Withdrawal"), "Debit Amt");
        assert_eq!(rename_column("Deposit"), "Credit Amt");
    }

    #[test]
    fn test_unknown_name_passthrough() {
        assert_eq!(rename_column("Balance"), "Balance");
        assert_eq!(rename_column("withdrawal"), "withdrawal");
        assert_eq!(rename_column("col2"), "col2");
    }
}
