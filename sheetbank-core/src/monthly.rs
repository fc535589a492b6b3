//! Per-month view over an extraction result.

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyStats {
    pub total_balance: f64,
    /// Always 0; only the declared balance is reported.
    pub total_income: f64,
    /// Always 0; only the declared balance is reported.
    pub total_expense: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary<'a> {
    pub stats: MonthlyStats,
    pub records: Vec<&'a Record>,
}

/// Filter `records` to `month0` (0..=11) of `year` and resolve the month's balance.
///
/// When several balance declarations exist, the one on the highest source
/// line wins (a correction appended lower in the sheet overrides the earlier
/// one). No declaration means a balance of 0.
pub fn monthly_summary(records: &[Record], month0: u32, year: i32) -> MonthlySummary<'_> {
    let filtered: Vec<&Record> = records.iter().filter(|r| r.in_month(month0, year)).collect();

    let mut balances: Vec<&Record> = filtered.iter().copied().filter(|r| r.is_balance()).collect();
    // Stable: equal lines keep extraction order, so the rightmost column wins.
    balances.sort_by_key(|r| r.line_index);

    let total_balance = balances
        .last()
        .and_then(|r| r.declared_balance())
        .unwrap_or(0.0);

    MonthlySummary {
        stats: MonthlyStats {
            total_balance,
            total_income: 0.0,
            total_expense: 0.0,
            transaction_count: filtered.len(),
        },
        records: filtered,
    }
}
