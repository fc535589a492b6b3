use std::future::Future;

use chrono::Utc;
use sheetbank_core::Record;
use sheetbank_ingest::{ExtractConfig, extract_records_with};
use tracing::debug;

use crate::error::SyncError;
use crate::sheet_url::to_csv_export_url;

/// Anything that can hand back the raw CSV text of a sheet.
pub trait CsvSource {
    fn fetch_csv(&self) -> impl Future<Output = Result<String, SyncError>> + Send;
}

/// HTTP source for a published or link-shared spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetFetcher {
    client: reqwest::Client,
    csv_url: String,
}

impl SheetFetcher {
    /// `sheet_url` may be a browser link; it is rewritten to the CSV export.
    pub fn new(sheet_url: &str) -> Result<Self, SyncError> {
        Ok(Self {
            client: reqwest::Client::new(),
            csv_url: to_csv_export_url(sheet_url)?,
        })
    }

    pub fn csv_url(&self) -> &str {
        &self.csv_url
    }
}

/// Append a `t=<millis>` parameter so intermediaries never serve a stale export.
pub fn with_cache_buster(url: &str, millis: i64) -> String {
    if url.contains('?') {
        format!("{url}&t={millis}")
    } else {
        format!("{url}?t={millis}")
    }
}

impl CsvSource for SheetFetcher {
    async fn fetch_csv(&self) -> Result<String, SyncError> {
        let url = with_cache_buster(&self.csv_url, Utc::now().timestamp_millis());
        debug!(%url, "fetching sheet");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}

/// Fetch once and run the extractor over the result.
pub async fn fetch_records<S: CsvSource>(
    source: &S,
    config: &ExtractConfig,
) -> Result<Vec<Record>, SyncError> {
    let text = source.fetch_csv().await?;
    Ok(extract_records_with(&text, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_separator() {
        assert_eq!(
            with_cache_buster("https://x.test/tq?tqx=out:csv", 17),
            "https://x.test/tq?tqx=out:csv&t=17"
        );
        assert_eq!(with_cache_buster("https://x.test/a.csv", 17), "https://x.test/a.csv?t=17");
    }

    #[test]
    fn test_fetcher_rewrites_browser_link() {
        let f = SheetFetcher::new("https://docs.google.com/spreadsheets/d/XYZ/edit#gid=5").unwrap();
        assert_eq!(
            f.csv_url(),
            "https://docs.google.com/spreadsheets/d/XYZ/gviz/tq?tqx=out:csv&gid=5"
        );
    }

    #[test]
    fn test_status_message() {
        assert_eq!(SyncError::Status(404).to_string(), "Could not access sheet (404).");
    }
}
