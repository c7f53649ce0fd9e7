//! Time-limited cache of the normalized order set.
//!
//! The sheet is fetched and normalized at most once per TTL. Every request in
//! between shares the same immutable `Arc` snapshot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::models::OrderRecord;
use crate::report::normalize::normalize_rows;
use crate::source::OrderSource;

pub type Snapshot = Arc<Vec<OrderRecord>>;

struct Loaded {
    records: Snapshot,
    loaded_at: Instant,
}

pub struct SnapshotCache {
    source: Box<dyn OrderSource>,
    ttl: Duration,
    slot: Mutex<Option<Loaded>>,
}

impl SnapshotCache {
    pub fn new(source: Box<dyn OrderSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached records, reloading them once the TTL has passed.
    ///
    /// The lock is held across the fetch so concurrent callers wait for one
    /// load instead of each starting their own. A failed load keeps the
    /// previous snapshot for the next attempt.
    pub async fn snapshot(&self) -> Result<Snapshot, SourceError> {
        let mut slot = self.slot.lock().await;

        if let Some(loaded) = slot.as_ref() {
            if loaded.loaded_at.elapsed() < self.ttl {
                debug!("Order snapshot cache hit ({} records)", loaded.records.len());
                return Ok(Arc::clone(&loaded.records));
            }
        }

        let rows = self.source.fetch().await?;
        let records: Snapshot = Arc::new(normalize_rows(rows));
        info!(
            "Loaded {} order records from {}",
            records.len(),
            self.source.describe()
        );

        *slot = Some(Loaded {
            records: Arc::clone(&records),
            loaded_at: Instant::now(),
        });
        Ok(records)
    }

    /// Drops the cached snapshot. Returns whether one was held.
    pub async fn invalidate(&self) -> bool {
        self.slot.lock().await.take().is_some()
    }
}
