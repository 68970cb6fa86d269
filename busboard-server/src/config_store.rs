//! On-disk config document store.
//!
//! The tracked-stop list lives in a single flat JSON document alongside
//! whatever other configuration the display device reads. Loads and
//! saves always move the whole document; there is no partial persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::TrackedStop;

/// Errors from loading or persisting the config document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted configuration document.
///
/// Unknown sibling keys are carried through `extra` so that a load/save
/// round trip never drops configuration this server does not own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub stops: Vec<TrackedStop>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads and writes the config document at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document from disk.
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the document, treating a missing file as an empty document.
    pub fn load_or_default(&self) -> Result<ConfigDocument, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the whole document to disk.
    pub fn save(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stop() -> TrackedStop {
        TrackedStop {
            route_name: "b65".to_string(),
            stop: "305183".to_string(),
            distance: 500.0,
            red_pin: "17".to_string(),
            green_pin: "18".to_string(),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let doc = store.load_or_default().unwrap();
        assert!(doc.stops.is_empty());
        assert!(doc.extra.is_empty());

        assert!(store.load().is_err());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let doc = ConfigDocument {
            stops: vec![sample_stop()],
            extra: serde_json::Map::new(),
        };
        store.save(&doc).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.stops.len(), 1);
        assert_eq!(loaded.stops[0].route_name, "b65");
        assert_eq!(loaded.stops[0].stop, "305183");
    }

    #[test]
    fn round_trip_preserves_sibling_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "stops": [], "serial_device": "/dev/ttyUSB0", "poll_seconds": 30 }"#,
        )
        .unwrap();

        let store = ConfigStore::new(&path);
        let mut doc = store.load().unwrap();
        doc.stops.push(sample_stop());
        store.save(&doc).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.stops.len(), 1);
        assert_eq!(
            reloaded.extra.get("serial_device").and_then(|v| v.as_str()),
            Some("/dev/ttyUSB0")
        );
        assert_eq!(
            reloaded.extra.get("poll_seconds").and_then(|v| v.as_i64()),
            Some(30)
        );
    }

    #[test]
    fn tracked_stop_uses_original_field_names() {
        let json = serde_json::to_value(sample_stop()).unwrap();
        assert!(json.get("route_name").is_some());
        assert!(json.get("redPin").is_some());
        assert!(json.get("greenPin").is_some());
    }
}
