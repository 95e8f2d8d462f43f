//! On-disk availability cache
//!
//! ```json
//! { "available_models": ["claude", "gemini"], "timestamp": "2025-01-01 12:00:00" }
//! ```

use super::error::RegistryError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCache {
    pub available_models: Vec<String>,
    pub timestamp: String,
}

impl AvailabilityCache {
    pub fn new(available: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            available_models: available.into_iter().map(Into::into).collect(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Read the cache; a missing or unreadable file yields `None`
    pub fn load(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No availability cache at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Could not read availability cache {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!("Ignoring malformed availability cache {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| RegistryError::CacheWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Delete the cache file if present
    pub fn clear(path: &Path) -> std::io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ai_models_cache.json");

        AvailabilityCache::new(["claude", "grok"]).save(&path).unwrap();
        let loaded = AvailabilityCache::load(&path).unwrap();
        assert_eq!(loaded.available_models, vec!["claude", "grok"]);
        assert_eq!(loaded.timestamp.len(), "2025-01-01 12:00:00".len());
    }

    #[test]
    fn test_reads_existing_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(
            &path,
            r#"{ "available_models": ["gemini"], "timestamp": "2025-06-01 08:00:00" }"#,
        )
        .unwrap();
        let loaded = AvailabilityCache::load(&path).unwrap();
        assert_eq!(loaded.available_models, vec!["gemini"]);
    }

    #[test]
    fn test_missing_or_malformed_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AvailabilityCache::load(&dir.path().join("none.json")).is_none());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(AvailabilityCache::load(&bad).is_none());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        AvailabilityCache::new(["claude"]).save(&path).unwrap();
        AvailabilityCache::clear(&path).unwrap();
        assert!(!path.exists());
        // clearing twice is fine
        AvailabilityCache::clear(&path).unwrap();
    }
}
