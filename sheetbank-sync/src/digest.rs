//! Compact record listing handed to the conversational analyst.
//!
//! Rows are `date,description,category,kind,amount`, no header.

use sheetbank_core::Record;

use crate::error::SyncError;

pub const DEFAULT_DIGEST_LIMIT: usize = 100;

/// Render the first `limit` records. Empty input renders as an empty string.
pub fn digest_records(records: &[Record], limit: usize) -> Result<String, SyncError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for r in records.iter().take(limit) {
        wtr.write_record([
            r.date.to_string(),
            r.description.clone(),
            r.category.as_str().to_string(),
            r.kind().as_str().to_string(),
            r.amount().to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| SyncError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
