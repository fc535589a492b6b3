//! Whole-export extraction: HTML check, line splitting and the
//! tokenize -> header scan -> classify pass over every row.

use sheetbank_core::Record;
use tracing::{debug, info, warn};

use crate::classifier::classify_row;
use crate::context::ColumnContextTracker;
use crate::error::ExtractError;
use crate::tokenizer::tokenize_line;
use crate::types::{ColumnContexts, ExtractConfig};

/// True when the payload is an HTML page rather than CSV. Private sheets
/// answer the export URL with a sign-in page.
pub fn is_html_payload(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower.starts_with("<!doctype html") || lower.contains("<html")
}

/// Non-blank lines, accepting both `\n` and `\r\n` endings.
fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}

/// Drop a stray quote left at either edge of a cell.
fn normalize_cell(cell: String) -> String {
    let c = cell.strip_prefix('"').unwrap_or(cell.as_str());
    let c = c.strip_suffix('"').unwrap_or(c);
    c.trim().to_string()
}

pub fn extract_records(text: &str) -> Result<Vec<Record>, ExtractError> {
    extract_records_with(text, &ExtractConfig::default())
}

/// Extract every balance declaration and inferred transaction from `text`.
///
/// An export with no recognizable rows yields an empty list, not an error.
pub fn extract_records_with(text: &str, config: &ExtractConfig) -> Result<Vec<Record>, ExtractError> {
    if is_html_payload(text) {
        warn!("source returned HTML instead of CSV");
        return Err(ExtractError::UnusableSource);
    }

    let tracker = ColumnContextTracker::new(config.block_width)?;
    let mut contexts = ColumnContexts::new();
    let mut records = Vec::new();
    let mut line_count = 0;

    for (line_index, line) in data_lines(text).enumerate() {
        let cells: Vec<String> = tokenize_line(line).into_iter().map(normalize_cell).collect();

        let headers = tracker.scan_row(&cells, &mut contexts);
        if headers > 0 {
            debug!(line_index, headers, "header row");
        }

        records.extend(classify_row(&cells, &contexts, line_index, line, config));
        line_count += 1;
    }

    info!(lines = line_count, records = records.len(), "extracted sheet");
    Ok(records)
}
