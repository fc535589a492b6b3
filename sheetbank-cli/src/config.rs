use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sheetbank_core::CatalogRange;
use sheetbank_ingest::ExtractConfig;
use sheetbank_sync::{DEFAULT_POLL_INTERVAL, looks_like_sheet_link};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::ensure_sheetbank_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetSection,
    #[serde(default)]
    pub sync: SyncSection,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub catalog: CatalogRange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetSection {
    /// Browser link or CSV export link
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    pub interval_secs: u64,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
        }
    }
}

impl SyncSection {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_sheetbank_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn set_sheet_url(url: &str) -> Result<()> {
    let url = url.trim();
    if !looks_like_sheet_link(url) {
        println!("Warning: that doesn't look like a Google Sheet link.");
    }

    let mut cfg = load_config()?;
    cfg.sheet.url = Some(url.to_string());
    save_config(&cfg)?;

    println!("Saved sheet URL to {}", config_path()?.display());
    println!("Make sure the sheet is shared as \"Anyone with the link\".");
    Ok(())
}
