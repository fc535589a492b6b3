use serde::Serialize;
use sheetbank_core::{Category, Record, RecordKind};

/// US-style money: `$1,234.56`, `-$40.00`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// JSON shape of a record as consumers see it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView<'a> {
    pub id: &'a str,
    pub date: String,
    pub description: &'a str,
    pub category: Category,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_balance: Option<f64>,
    pub kind: RecordKind,
    pub source_line: &'a str,
}

impl<'a> From<&'a Record> for RecordView<'a> {
    fn from(r: &'a Record) -> Self {
        Self {
            id: &r.id,
            date: r.date.to_string(),
            description: &r.description,
            category: r.category,
            amount: r.amount(),
            declared_balance: r.declared_balance(),
            kind: r.kind(),
            source_line: &r.source_line,
        }
    }
}

pub fn record_line(r: &Record) -> String {
    let marker = if r.is_balance() { " (balance row)" } else { "" };
    format!(
        "{:<18} {} {:<7} {:>14}  {}{}",
        r.id,
        r.date,
        r.kind().as_str(),
        format_currency(r.amount()),
        r.description,
        marker
    )
}
