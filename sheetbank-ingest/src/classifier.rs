//! Per-cell record emission.
//!
//! Rules are tried in priority order and the first rule whose guard matches
//! claims the cell. A claimed cell that finds no amount to its right emits
//! nothing; lower rules never get a second look at it.

use sheetbank_core::Record;
use tracing::debug;

use crate::types::{ColumnContexts, ExtractConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRule {
    /// "Current Balance" label followed by the month's balance
    BalanceDeclaration,
    /// Free text followed by an amount
    Transaction,
}

pub const CELL_RULES: [CellRule; 2] = [CellRule::BalanceDeclaration, CellRule::Transaction];

impl CellRule {
    /// Whether this rule claims `cell`.
    pub fn claims(&self, cell: &str) -> bool {
        let lower = cell.to_lowercase();
        match self {
            CellRule::BalanceDeclaration => lower.contains("current balance"),
            // "date" / "amount" keep column labels out of the data.
            CellRule::Transaction => {
                cell.chars().count() > 2
                    && !lower.contains("date")
                    && !lower.contains("amount")
                    && parse_amount(cell).is_none()
            }
        }
    }

    /// Cells to the right searched for the amount.
    pub fn scan_width(&self, config: &ExtractConfig) -> usize {
        match self {
            CellRule::BalanceDeclaration => config.balance_scan_width,
            CellRule::Transaction => config.transaction_scan_width,
        }
    }
}

/// First rule claiming `cell`, if any.
pub fn claiming_rule(cell: &str) -> Option<CellRule> {
    CELL_RULES.iter().copied().find(|rule| rule.claims(cell))
}

/// Parse a spreadsheet amount like "$1,200.50", "-£ 40" or "1 000".
///
/// Currency symbols, commas and whitespace are stripped first. Nothing left,
/// or something that is not a finite number, means "not an amount".
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '£' | '€' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The nearest amount among the `width` cells right of `col`.
pub fn first_amount_right_of(cells: &[String], col: usize, width: usize) -> Option<f64> {
    cells
        .iter()
        .skip(col + 1)
        .take(width)
        .find_map(|cell| parse_amount(cell))
}

/// Emit the records for one row. `contexts` must already include this row's
/// own headers.
pub fn classify_row(
    cells: &[String],
    contexts: &ColumnContexts,
    line_index: usize,
    raw_line: &str,
    config: &ExtractConfig,
) -> Vec<Record> {
    let mut out = Vec::new();

    for (col, cell) in cells.iter().enumerate() {
        let Some(ctx) = contexts.get(col) else {
            continue;
        };
        let Some(rule) = claiming_rule(cell) else {
            continue;
        };
        let Some(value) = first_amount_right_of(cells, col, rule.scan_width(config)) else {
            continue;
        };
        let Some(date) = ctx.first_day() else {
            continue;
        };

        let record = match rule {
            CellRule::BalanceDeclaration => {
                Record::balance(date, cell.as_str(), value, line_index, col, raw_line)
            }
            CellRule::Transaction => {
                Record::transaction(date, cell.as_str(), value, line_index, col, raw_line)
            }
        };
        debug!(id = %record.id, value, "emitted record");
        out.push(record);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnContext;
    use sheetbank_core::{Category, RecordKind};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn march_contexts() -> ColumnContexts {
        let mut ctxs = ColumnContexts::new();
        ctxs.assign_block(0, 8, ColumnContext { month: 2, year: 2025 });
        ctxs
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,200.50"), Some(1200.50));
        assert_eq!(parse_amount("-£ 40"), Some(-40.0));
        assert_eq!(parse_amount(" €7 "), Some(7.0));
        assert_eq!(parse_amount("1 000"), Some(1000.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(claiming_rule("Current Balance"), Some(CellRule::BalanceDeclaration));
        assert_eq!(claiming_rule("CURRENT BALANCE (bank)"), Some(CellRule::BalanceDeclaration));
        assert_eq!(claiming_rule("Groceries"), Some(CellRule::Transaction));
        assert_eq!(claiming_rule("Date"), None);
        assert_eq!(claiming_rule("Amount paid"), None);
        assert_eq!(claiming_rule("ok"), None);
        assert_eq!(claiming_rule("$1,000"), None);
    }

    #[test]
    fn test_balance_nearest_right_wins() {
        let cells = row(&["Current Balance", "", "$1,200.50", "$999"]);
        let records = classify_row(&cells, &march_contexts(), 4, "raw", &ExtractConfig::default());

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.category, Category::Balance);
        assert_eq!(r.declared_balance(), Some(1200.50));
        assert_eq!(r.id, "bal-2025-2-4-0");
        assert_eq!(r.description, "Current Balance");
        assert_eq!(r.source_line, "raw");
    }

    #[test]
    fn test_balance_scan_stops_after_nine_cells() {
        let mut cells = row(&["Current Balance"]);
        cells.extend(std::iter::repeat_n(String::new(), 9));
        cells.push("100".to_string());

        let mut ctxs = ColumnContexts::new();
        ctxs.assign_block(0, 1, ColumnContext { month: 0, year: 2025 });

        let records = classify_row(&cells, &ctxs, 0, "raw", &ExtractConfig::default());
        assert!(records.is_empty());

        cells.remove(1);
        let records = classify_row(&cells, &ctxs, 0, "raw", &ExtractConfig::default());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_balance_label_without_amount_is_not_a_transaction() {
        let cells = row(&["Current Balance", "n/a", "", "", "", "", "", "", "", ""]);
        let records = classify_row(&cells, &march_contexts(), 0, "raw", &ExtractConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_transaction_within_three_cells() {
        let cells = row(&["Rent", "Housing", "", "-1200", "Salary", "3,000"]);
        let records = classify_row(&cells, &march_contexts(), 2, "raw", &ExtractConfig::default());

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        // "Housing" also sees -1200 two cells away.
        assert_eq!(ids, vec!["tx-2-0", "tx-2-1", "tx-2-4"]);

        assert_eq!(records[0].description, "Rent");
        assert_eq!(records[0].amount(), 1200.0);
        assert_eq!(records[0].kind(), RecordKind::Expense);
        assert_eq!(records[2].amount(), 3000.0);
        assert_eq!(records[2].kind(), RecordKind::Income);
    }

    #[test]
    fn test_transaction_amount_too_far() {
        let cells = row(&["Rent", "", "", "", "-1200"]);
        let records = classify_row(&cells, &march_contexts(), 0, "raw", &ExtractConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_cells_without_context_are_skipped() {
        let cells = row(&["Rent", "100"]);
        let records = classify_row(&cells, &ColumnContexts::new(), 0, "raw", &ExtractConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_custom_scan_width() {
        let cells = row(&["Rent", "", "", "", "-1200"]);
        let config = ExtractConfig {
            transaction_scan_width: 4,
            ..ExtractConfig::default()
        };
        let records = classify_row(&cells, &march_contexts(), 0, "raw", &config);
        assert_eq!(records.len(), 1);
    }
}
