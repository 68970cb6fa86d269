//! Tracked-stop registry.
//!
//! The operator curates a small list of (route, stop) pairs, each bound
//! to a red/green indicator pin pair on the display device. The registry
//! owns the in-memory list and persists the whole config document after
//! every mutation.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config_store::{ConfigDocument, ConfigError, ConfigStore};

/// One curated stop entry, as persisted in the config document.
///
/// Field names match the document the display device reads
/// (`route_name`, `stop`, `distance`, `redPin`, `greenPin`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedStop {
    /// Lowercased route name with the agency prefix stripped ("b65").
    pub route_name: String,
    /// Upstream stop id, without the agency qualifier.
    pub stop: String,
    /// Walking distance to the stop, in meters.
    pub distance: f64,
    #[serde(rename = "redPin")]
    pub red_pin: String,
    #[serde(rename = "greenPin")]
    pub green_pin: String,
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A position outside the tracked list was referenced
    #[error("index {index} out of range (list has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    /// Persisting the config document failed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Owner of the curated tracked-stop list.
///
/// All mutation goes through one async mutex, and the full-document
/// persist happens while the lock is held, so no save can observe a
/// partially applied mutation.
pub struct TrackedStopRegistry {
    doc: Mutex<ConfigDocument>,
    store: ConfigStore,
    /// Number of leading characters (agency id plus delimiter) stripped
    /// from route ids on insert.
    route_prefix_len: usize,
}

impl TrackedStopRegistry {
    /// Create a registry over an already-loaded config document.
    pub fn new(store: ConfigStore, doc: ConfigDocument, route_prefix_len: usize) -> Self {
        Self {
            doc: Mutex::new(doc),
            store,
            route_prefix_len,
        }
    }

    /// Snapshot of the tracked list, in order.
    pub async fn list(&self) -> Vec<TrackedStop> {
        self.doc.lock().await.stops.clone()
    }

    /// Remove the entry at `index` and persist.
    ///
    /// Out-of-range positions fail without touching the store.
    pub async fn remove_at(&self, index: usize) -> Result<(), RegistryError> {
        let mut doc = self.doc.lock().await;

        if index >= doc.stops.len() {
            return Err(RegistryError::OutOfRange {
                index,
                len: doc.stops.len(),
            });
        }

        doc.stops.remove(index);
        self.store.save(&doc)?;
        Ok(())
    }

    /// Insert or replace an entry and persist.
    ///
    /// The route name is normalized first (agency prefix stripped,
    /// lowercased). Any existing entry with the same (route_name, stop)
    /// pair is removed and the new entry appended at the end, so a
    /// replaced entry moves to the end of the list. That matches the
    /// config format the display device has always read; do not "fix"
    /// it into an in-place update.
    pub async fn upsert(&self, entry: TrackedStop) -> Result<(), RegistryError> {
        let entry = TrackedStop {
            route_name: normalize_route_name(&entry.route_name, self.route_prefix_len),
            ..entry
        };

        let mut doc = self.doc.lock().await;
        doc.stops
            .retain(|s| !(s.route_name == entry.route_name && s.stop == entry.stop));
        doc.stops.push(entry);
        self.store.save(&doc)?;
        Ok(())
    }
}

/// Strip the agency-qualified prefix from a route id and lowercase the
/// remainder: "MTA NYCT_B65" → "b65" (prefix length 9).
///
/// Ids shorter than the prefix are assumed to already be bare route
/// names and are only lowercased.
pub fn normalize_route_name(route_id: &str, prefix_len: usize) -> String {
    route_id
        .get(prefix_len..)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(route_id)
        .to_lowercase()
}
