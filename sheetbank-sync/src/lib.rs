//! sheetbank-sync: sheet link resolution, HTTP fetch, interval polling and the analyst digest

pub mod digest;
pub mod error;
pub mod fetch;
pub mod poller;
pub mod sheet_url;

pub use digest::{DEFAULT_DIGEST_LIMIT, digest_records};
pub use error::SyncError;
pub use fetch::{CsvSource, SheetFetcher, fetch_records};
pub use poller::{DEFAULT_POLL_INTERVAL, SheetPoller, Snapshot};
pub use sheet_url::{looks_like_sheet_link, to_csv_export_url};
