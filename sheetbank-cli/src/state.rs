use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SHEETBANK_HOME`, or `~/.sheetbank`.
pub fn sheetbank_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SHEETBANK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".sheetbank"))
}

pub fn ensure_sheetbank_home() -> Result<PathBuf> {
    let dir = sheetbank_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
