//! Selectable month catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_YEAR: i32 = 2024;
pub const DEFAULT_END_YEAR: i32 = 2030;

/// One selectable period. `month` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
    pub label: String,
}

/// Inclusive year window for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for CatalogRange {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
        }
    }
}

impl CatalogRange {
    pub fn months(&self) -> Vec<MonthYear> {
        month_range(self.start_year, self.end_year)
    }
}

/// Human label like "January 2025".
pub fn month_label(month0: u32, year: i32) -> String {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}/{}", month0 + 1, year))
}

/// Every month from January `start_year` through December `end_year`,
/// newest first.
pub fn month_range(start_year: i32, end_year: i32) -> Vec<MonthYear> {
    let mut months = Vec::new();
    for year in start_year..=end_year {
        for month in 0..12 {
            months.push(MonthYear {
                month,
                year,
                label: month_label(month, year),
            });
        }
    }
    months.reverse();
    months
}

/// The catalog the app ships with: Jan 2024 through Dec 2030.
pub fn fixed_month_range() -> Vec<MonthYear> {
    month_range(DEFAULT_START_YEAR, DEFAULT_END_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_range_bounds() {
        let months = fixed_month_range();
        assert_eq!(months.len(), 12 * 7);

        let first = &months[0];
        assert_eq!((first.month, first.year), (11, 2030));
        assert_eq!(first.label, "December 2030");

        let last = months.last().unwrap();
        assert_eq!((last.month, last.year), (0, 2024));
        assert_eq!(last.label, "January 2024");
    }

    #[test]
    fn test_range_is_strictly_descending() {
        let months = month_range(2025, 2026);
        for w in months.windows(2) {
            let a = w[0].year * 12 + w[0].month as i32;
            let b = w[1].year * 12 + w[1].month as i32;
            assert_eq!(a, b + 1);
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(month_range(2030, 2024).is_empty());
    }

    #[test]
    fn test_catalog_range_default() {
        assert_eq!(CatalogRange::default().months(), fixed_month_range());
    }
}
