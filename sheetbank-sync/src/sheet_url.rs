//! Browser spreadsheet links -> CSV export links.
//!
//! Users paste whatever is in their address bar:
//!   https://docs.google.com/spreadsheets/d/<id>/edit#gid=123
//! which is fetched as:
//!   https://docs.google.com/spreadsheets/d/<id>/gviz/tq?tqx=out:csv&gid=123

use regex::Regex;

use crate::error::SyncError;

/// Rewrite a sheet link into its CSV export form.
///
/// Links that already export CSV, and links that are not sheet links at all,
/// are returned unchanged.
pub fn to_csv_export_url(url: &str) -> Result<String, SyncError> {
    if url.is_empty() {
        return Ok(String::new());
    }
    if url.contains("output=csv") || url.contains("tqx=out:csv") {
        return Ok(url.to_string());
    }

    let id_re = Regex::new(r"/d/([A-Za-z0-9_-]+)")?;
    let gid_re = Regex::new(r"[#&]gid=([0-9]+)")?;

    let Some(id) = id_re.captures(url).map(|caps| caps[1].to_string()) else {
        return Ok(url.to_string());
    };
    let gid = gid_re
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "0".to_string());

    Ok(format!(
        "https://docs.google.com/spreadsheets/d/{id}/gviz/tq?tqx=out:csv&gid={gid}"
    ))
}

pub fn looks_like_sheet_link(url: &str) -> bool {
    url.contains("docs.google.com")
}
