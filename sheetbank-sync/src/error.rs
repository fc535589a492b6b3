use sheetbank_ingest::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Could not access sheet ({0}).")]
    Status(u16),

    #[error("sheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("write digest: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid url pattern: {0}")]
    Pattern(#[from] regex::Error),
}
