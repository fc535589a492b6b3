//! sheetbank-ingest: heuristic extraction of month blocks, balances and transactions
//! from free-form spreadsheet CSV exports.

pub mod classifier;
pub mod context;
pub mod error;
pub mod extract;
pub mod tokenizer;
pub mod types;

pub use classifier::{CELL_RULES, CellRule, classify_row, parse_amount};
pub use context::ColumnContextTracker;
pub use error::ExtractError;
pub use extract::{extract_records, extract_records_with, is_html_payload};
pub use tokenizer::tokenize_line;
pub use types::{ColumnContext, ColumnContexts, ExtractConfig};
