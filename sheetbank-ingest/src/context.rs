//! Month header detection and column block assignment.
//!
//! A header cell looks like "Jan 2025", "March-25" or "sept '24". A match
//! claims a block of columns starting at the header's own column. Headers are
//! scanned left to right, so a later header overwrites any overlap.

use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;
use crate::types::{ColumnContext, ColumnContexts};

const HEADER_PATTERN: &str =
    r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s\-'’]+([0-9]{2,4})";

/// Longer cells are descriptions that happen to mention a date.
const MAX_HEADER_CHARS: usize = 24;

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

fn month_index(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => 0,
        "feb" => 1,
        "mar" => 2,
        "apr" => 3,
        "may" => 4,
        "jun" => 5,
        "jul" => 6,
        "aug" => 7,
        "sep" => 8,
        "oct" => 9,
        "nov" => 10,
        "dec" => 11,
        _ => return None,
    };
    Some(month)
}

#[derive(Debug, Clone)]
pub struct ColumnContextTracker {
    header_re: Regex,
    block_width: usize,
}

impl ColumnContextTracker {
    pub fn new(block_width: usize) -> Result<Self, ExtractError> {
        Ok(Self {
            header_re: Regex::new(HEADER_PATTERN)?,
            block_width,
        })
    }

    /// Interpret one cell as a month header.
    pub fn match_header(&self, cell: &str) -> Option<ColumnContext> {
        if cell.chars().count() > MAX_HEADER_CHARS || cell.contains(CURRENCY_SYMBOLS) {
            return None;
        }

        let caps = self.header_re.captures(cell)?;
        let month = month_index(&caps[1])?;
        let mut year: i32 = caps[2].parse().ok()?;
        if year < 100 {
            year += 2000;
        }

        Some(ColumnContext { month, year })
    }

    /// Scan a row for headers and write their blocks into `contexts`.
    /// Returns the number of headers found.
    pub fn scan_row(&self, cells: &[String], contexts: &mut ColumnContexts) -> usize {
        let mut found = 0;
        for (col, cell) in cells.iter().enumerate() {
            if let Some(ctx) = self.match_header(cell) {
                debug!(column = col, month = ctx.month, year = ctx.year, "month header");
                contexts.assign_block(col, self.block_width, ctx);
                found += 1;
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ColumnContextTracker {
        ColumnContextTracker::new(8).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_variants() {
        let t = tracker();
        assert_eq!(t.match_header("Jan 2025"), Some(ColumnContext { month: 0, year: 2025 }));
        assert_eq!(t.match_header("MARCH-25"), Some(ColumnContext { month: 2, year: 2025 }));
        assert_eq!(t.match_header("Sept '24"), Some(ColumnContext { month: 8, year: 2024 }));
        assert_eq!(t.match_header("December’23"), Some(ColumnContext { month: 11, year: 2023 }));
        assert_eq!(t.match_header("July 2025 budget"), Some(ColumnContext { month: 6, year: 2025 }));
    }

    #[test]
    fn test_rejects_non_headers() {
        let t = tracker();
        assert_eq!(t.match_header("Groceries"), None);
        assert_eq!(t.match_header("Jan2025"), None);
        assert_eq!(t.match_header("$ Jan 2025"), None);
        assert_eq!(t.match_header("€40 paid on Mar 2025"), None);
        assert_eq!(t.match_header("Paid landlord back on Jan 2025"), None);
    }

    #[test]
    fn test_year_must_be_ascii_digits() {
        let t = tracker();
        assert_eq!(t.match_header("Jan ١١"), None);
        assert_eq!(t.match_header("Jan ١١ Feb 2025"), Some(ColumnContext { month: 1, year: 2025 }));
    }

    #[test]
    fn test_length_limit_is_24_chars() {
        let t = tracker();
        // exactly 24
        assert!(t.match_header("Jan 2025 xxxxxxxxxxxxxxx").is_some());
        // 25
        assert!(t.match_header("Jan 2025 xxxxxxxxxxxxxxxx").is_none());
    }

    #[test]
    fn test_later_header_in_row_wins_overlap() {
        let t = tracker();
        let mut ctxs = ColumnContexts::new();
        let mut cells = vec![String::new(); 18];
        cells[0] = "Jan 2025".to_string();
        cells[10] = "Feb 2025".to_string();

        assert_eq!(t.scan_row(&cells, &mut ctxs), 2);
        assert_eq!(ctxs.get(0), Some(ColumnContext { month: 0, year: 2025 }));
        assert_eq!(ctxs.get(7), Some(ColumnContext { month: 0, year: 2025 }));
        assert_eq!(ctxs.get(8), None);
        assert_eq!(ctxs.get(10), Some(ColumnContext { month: 1, year: 2025 }));
        assert_eq!(ctxs.get(17), Some(ColumnContext { month: 1, year: 2025 }));
    }

    #[test]
    fn test_overlapping_blocks() {
        let t = tracker();
        let mut ctxs = ColumnContexts::new();
        t.scan_row(&row(&["Jan 25", "", "", "", "Feb 25"]), &mut ctxs);

        assert_eq!(ctxs.get(3).map(|c| c.month), Some(0));
        assert_eq!(ctxs.get(4).map(|c| c.month), Some(1));
        assert_eq!(ctxs.get(11).map(|c| c.month), Some(1));
    }

    #[test]
    fn test_contexts_persist_until_overwritten() {
        let t = tracker();
        let mut ctxs = ColumnContexts::new();
        t.scan_row(&row(&["Jan 2025"]), &mut ctxs);
        assert_eq!(t.scan_row(&row(&["Rent", "100"]), &mut ctxs), 0);
        assert_eq!(ctxs.get(1).map(|c| c.month), Some(0));

        t.scan_row(&row(&["Apr 2025"]), &mut ctxs);
        assert_eq!(ctxs.get(1).map(|c| c.month), Some(3));
    }
}
