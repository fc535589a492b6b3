//! Record types extracted from sheet exports

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A balance declaration or an inferred transaction, dated to the first day
/// of the month block it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique within one extraction result
    pub id: String,
    /// First day of the record's month
    pub date: NaiveDate,
    /// Literal text of the originating cell
    pub description: String,
    pub category: Category,
    /// Signed value as written in the sheet
    pub value: f64,
    /// Index of the originating line among the non-blank input lines
    pub line_index: usize,
    /// Index of the originating cell within its line
    pub column: usize,
    /// Raw line text, kept for auditing
    pub source_line: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Balance,
    General,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Balance => "Balance",
            Category::General => "General",
        }
    }
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }

    /// Negative values are expenses, everything else is income.
    pub fn from_value(value: f64) -> Self {
        if value < 0.0 {
            RecordKind::Expense
        } else {
            RecordKind::Income
        }
    }
}

impl Record {
    /// Build a balance declaration. The id carries the 0-based month.
    pub fn balance(
        date: NaiveDate,
        description: impl Into<String>,
        value: f64,
        line_index: usize,
        column: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            id: format!(
                "bal-{}-{}-{}-{}",
                date.year(),
                date.month0(),
                line_index,
                column
            ),
            date,
            description: description.into(),
            category: Category::Balance,
            value,
            line_index,
            column,
            source_line: source_line.into(),
        }
    }

    /// Build a transaction inferred from a text cell followed by a number.
    pub fn transaction(
        date: NaiveDate,
        description: impl Into<String>,
        value: f64,
        line_index: usize,
        column: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("tx-{}-{}", line_index, column),
            date,
            description: description.into(),
            category: Category::General,
            value,
            line_index,
            column,
            source_line: source_line.into(),
        }
    }

    /// Non-negative magnitude
    pub fn amount(&self) -> f64 {
        self.value.abs()
    }

    pub fn kind(&self) -> RecordKind {
        RecordKind::from_value(self.value)
    }

    /// The signed balance, only for balance declarations.
    pub fn declared_balance(&self) -> Option<f64> {
        match self.category {
            Category::Balance => Some(self.value),
            Category::General => None,
        }
    }

    pub fn is_balance(&self) -> bool {
        self.category == Category::Balance
    }

    /// True when the record belongs to `month0` (0..=11) of `year`.
    pub fn in_month(&self, month0: u32, year: i32) -> bool {
        self.date.month0() == month0 && self.date.year() == year
    }
}
