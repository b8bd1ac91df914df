/// TTL cache for the live alert feed.
///
/// ## States
///
/// ```text
///   Empty ──fetch ok──▶ Fresh ──TTL elapses──▶ Expired ──fetch ok──▶ Fresh
///     │                                          │
///     └─fetch fails─▶ UpstreamUnavailable        └─fetch fails─▶ serve previous payload
/// ```
///
/// - A fresh hit never touches the upstream.
/// - A successful refresh replaces payload and timestamp together.
/// - A failed refresh keeps the previous payload *and its timestamp*, so the
///   next request retries instead of treating the stale copy as validated.
/// - Only a failure with nothing cached reaches the caller as an error.
///
/// Concurrent requests that all find the entry expired may each fetch; the
/// upstream call is read-only and idempotent.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::ingest::AlertSource;
use crate::model::{AlertCollection, HazmonError};

/// Live feed TTL: 5 minutes.
pub const ALERT_CACHE_TTL_MS: i64 = 5 * 60 * 1000;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A cached payload with the time it was fetched.
///
/// Stale and fresh results have the same shape; callers that care compare
/// `fetched_at_ms` against the current time.
#[derive(Debug, Clone)]
pub struct AlertSnapshot {
    pub collection: Arc<AlertCollection>,
    pub fetched_at_ms: i64,
}

impl AlertSnapshot {
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.fetched_at_ms)
    }

    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis() - self.fetched_at_ms
    }

    /// True when the snapshot is older than the cache TTL.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.age_ms(now) >= ALERT_CACHE_TTL_MS
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

pub struct AlertCache {
    source: Box<dyn AlertSource>,
    entry: RwLock<Option<AlertSnapshot>>,
}

impl AlertCache {
    pub fn new(source: Box<dyn AlertSource>) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
        }
    }

    /// Current alerts, refreshing from upstream when the entry is missing or
    /// older than the TTL.
    pub fn get(&self) -> Result<AlertSnapshot, HazmonError> {
        self.get_at(Utc::now())
    }

    /// `get` with an explicit clock.
    ///
    /// # Errors
    /// `HazmonError::UpstreamUnavailable` when the fetch fails and nothing
    /// has ever been cached.
    pub fn get_at(&self, now: DateTime<Utc>) -> Result<AlertSnapshot, HazmonError> {
        let now_ms = now.timestamp_millis();

        if let Some(snapshot) = self.current() {
            if now_ms - snapshot.fetched_at_ms < ALERT_CACHE_TTL_MS {
                debug!(age_ms = now_ms - snapshot.fetched_at_ms, "alert cache hit");
                return Ok(snapshot);
            }
        }

        match self.source.fetch_alerts() {
            Ok(collection) => {
                let snapshot = AlertSnapshot {
                    collection: Arc::new(collection),
                    fetched_at_ms: now_ms,
                };
                self.store(snapshot.clone());
                info!(
                    source = self.source.name(),
                    alerts = snapshot.collection.len(),
                    "alert cache refreshed"
                );
                Ok(snapshot)
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "alert fetch failed");
                match self.current() {
                    Some(previous) => {
                        warn!(
                            age_secs = (now_ms - previous.fetched_at_ms) / 1000,
                            "serving stale alerts"
                        );
                        Ok(previous)
                    }
                    None => Err(HazmonError::upstream(self.source.name(), e)),
                }
            }
        }
    }

    /// The cached snapshot, if any, without refreshing.
    pub fn current(&self) -> Option<AlertSnapshot> {
        self.entry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fetch time of the cached payload in epoch milliseconds.
    pub fn fetched_at_ms(&self) -> Option<i64> {
        self.current().map(|s| s.fetched_at_ms)
    }

    // Overlapping refreshes: the later-stamped snapshot wins.
    fn store(&self, snapshot: AlertSnapshot) {
        let mut entry = self
            .entry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let newer = entry
            .as_ref()
            .is_none_or(|existing| snapshot.fetched_at_ms >= existing.fetched_at_ms);
        if newer {
            *entry = Some(snapshot);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
