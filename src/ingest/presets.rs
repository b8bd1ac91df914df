/// Historical alert snapshots.
///
/// A preset is a saved alert collection (for example the feed as it stood
/// during a past hurricane) served in place of the live feed. Presets are
/// read from disk once at startup and never touch the live alert cache.
/// Looking up an unregistered name is a client error, not a cache miss.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::PresetConfig;
use crate::ingest::nws::parse_alert_collection;
use crate::model::{AlertCollection, HazmonError};

/// Preset served when a request names none.
pub const DEFAULT_PRESET: &str = "ian";

#[derive(Debug, Default)]
pub struct PresetRegistry {
    presets: HashMap<String, Arc<AlertCollection>>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every configured preset. Relative paths resolve against
    /// `base_dir`. A missing or malformed snapshot file aborts loading.
    pub fn load(entries: &[PresetConfig], base_dir: &Path) -> Result<Self, HazmonError> {
        let mut registry = Self::new();

        for entry in entries {
            let path = base_dir.join(&entry.path);
            let contents = fs::read_to_string(&path).map_err(|e| {
                HazmonError::Config(format!("failed to read preset {} ({}): {}", entry.name, path.display(), e))
            })?;
            let collection = parse_alert_collection(&contents).map_err(|e| {
                HazmonError::Config(format!("failed to parse preset {}: {}", entry.name, e))
            })?;

            info!(preset = %entry.name, alerts = collection.len(), "loaded historical preset");
            registry.insert(&entry.name, collection);
        }

        Ok(registry)
    }

    pub fn insert(&mut self, name: &str, collection: AlertCollection) {
        self.presets.insert(name.to_string(), Arc::new(collection));
    }

    /// Snapshot registered under `name`.
    ///
    /// # Errors
    /// `HazmonError::UnknownPreset` when nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<AlertCollection>, HazmonError> {
        self.presets
            .get(name)
            .cloned()
            .ok_or_else(|| HazmonError::UnknownPreset(name.to_string()))
    }

    /// Registered preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
