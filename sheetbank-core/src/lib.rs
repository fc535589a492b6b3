//! sheetbank-core: record types, the month catalog and per-month balance resolution

pub mod calendar;
pub mod monthly;
pub mod record;

pub use calendar::{CatalogRange, MonthYear, fixed_month_range, month_label, month_range};
pub use monthly::{MonthlyStats, MonthlySummary, monthly_summary};
pub use record::{Category, Record, RecordKind};
