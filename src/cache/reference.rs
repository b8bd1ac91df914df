/// Permanent cache for the county boundary reference dataset.
///
/// The dataset is fetched on first use and held for the life of the
/// process: no TTL, no invalidation. A failed load leaves the cache empty so
/// a later request can try again. First loads are serialized so concurrent
/// cold requests download the file once.

use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info, warn};

use crate::ingest::{CountyBoundaries, ReferenceSource};
use crate::model::HazmonError;

pub struct ReferenceDataCache {
    source: Box<dyn ReferenceSource>,
    entry: RwLock<Option<Arc<CountyBoundaries>>>,
    load_lock: Mutex<()>,
}

impl ReferenceDataCache {
    pub fn new(source: Box<dyn ReferenceSource>) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// The reference dataset, fetching it if this is the first successful
    /// call.
    ///
    /// # Errors
    /// `HazmonError::UpstreamUnavailable` when the fetch fails. Nothing is
    /// cached in that case.
    pub fn get(&self) -> Result<Arc<CountyBoundaries>, HazmonError> {
        if let Some(cached) = self.cached() {
            debug!("reference cache hit");
            return Ok(cached);
        }

        let _loading = self
            .load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another request may have finished loading while we waited.
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        match self.source.fetch_reference() {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                *self
                    .entry
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&dataset));
                info!(
                    source = self.source.name(),
                    features = dataset.features.len(),
                    "reference dataset loaded"
                );
                Ok(dataset)
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "reference fetch failed");
                Err(HazmonError::upstream(self.source.name(), e))
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Arc<CountyBoundaries>> {
        self.entry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
