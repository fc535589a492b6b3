use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BLOCK_WIDTH: usize = 8;
pub const DEFAULT_BALANCE_SCAN_WIDTH: usize = 9;
pub const DEFAULT_TRANSACTION_SCAN_WIDTH: usize = 3;

/// The calendar period a column currently belongs to. `month` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnContext {
    pub month: u32,
    pub year: i32,
}

impl ColumnContext {
    /// First day of the period, `None` for years chrono cannot represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }
}

/// Column index -> period, threaded through one extraction call.
///
/// Header rows write into it; every later row reads from it. Each header
/// claims a half-open span of columns; a later span shadows any earlier one it
/// overlaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnContexts {
    spans: Vec<ColumnSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnSpan {
    start: usize,
    end: usize,
    ctx: ColumnContext,
}

impl ColumnSpan {
    fn contains(&self, column: usize) -> bool {
        self.start <= column && column < self.end
    }
}

impl ColumnContexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: usize) -> Option<ColumnContext> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.contains(column))
            .map(|span| span.ctx)
    }

    /// Assign `ctx` to columns `[start, start + width)`, saturating at `usize::MAX`.
    pub fn assign_block(&mut self, start: usize, width: usize, ctx: ColumnContext) {
        if width == 0 {
            return;
        }
        let end = start.saturating_add(width);
        // Fully shadowed spans can never be read again.
        self.spans.retain(|span| span.start < start || span.end > end);
        self.spans.push(ColumnSpan { start, end, ctx });
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Layout heuristics. The defaults match sheets that reserve eight columns per
/// month for description, category, type, amount and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Columns claimed by a month header, starting at the header cell
    pub block_width: usize,
    /// Cells searched to the right of a "current balance" label
    pub balance_scan_width: usize,
    /// Cells searched to the right of a transaction description
    pub transaction_scan_width: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            block_width: DEFAULT_BLOCK_WIDTH,
            balance_scan_width: DEFAULT_BALANCE_SCAN_WIDTH,
            transaction_scan_width: DEFAULT_TRANSACTION_SCAN_WIDTH,
        }
    }
}
