//! Fetch -> extract on a fixed interval.
//!
//! Every successful cycle replaces the published record set wholesale. A
//! failed cycle keeps the last good records and only updates `error`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sheetbank_core::Record;
use sheetbank_ingest::ExtractConfig;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::fetch::{CsvSource, fetch_records};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Records from the last successful cycle
    pub records: Arc<[Record]>,
    /// Message from the last cycle, if it failed
    pub error: Option<String>,
    /// When `records` was last replaced
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Completed cycles, successful or not
    pub cycle: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            error: None,
            refreshed_at: None,
            cycle: 0,
        }
    }
}

pub struct SheetPoller<S> {
    source: S,
    config: ExtractConfig,
    interval: Duration,
    tx: watch::Sender<Snapshot>,
}

impl<S: CsvSource> SheetPoller<S> {
    pub fn new(source: S, config: ExtractConfig, interval: Duration) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self {
            source,
            config,
            interval,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Run one cycle and publish the outcome. Returns the record count.
    pub async fn refresh_once(&self) -> Result<usize, SyncError> {
        match fetch_records(&self.source, &self.config).await {
            Ok(records) => {
                let count = records.len();
                if count == 0 {
                    warn!("parsed 0 rows");
                }
                self.tx.send_modify(|snap| {
                    snap.records = Arc::from(records);
                    snap.error = None;
                    snap.refreshed_at = Some(Utc::now());
                    snap.cycle += 1;
                });
                info!(records = count, "sheet refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "sheet refresh failed");
                self.tx.send_modify(|snap| {
                    snap.error = Some(e.to_string());
                    snap.cycle += 1;
                });
                Err(e)
            }
        }
    }

    /// Poll until `shutdown` resolves or every subscriber is gone.
    ///
    /// The first cycle runs immediately unless `shutdown` is already resolved;
    /// shutdown is always checked before the next tick. Errors are published on the snapshot
    /// and the next tick acts as the retry.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    if self.tx.is_closed() {
                        break;
                    }
                    let _ = self.refresh_once().await;
                }
            }
        }
        info!("poller stopped");
    }
}
