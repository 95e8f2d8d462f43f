//! Backend configuration from TOML (`[backends]` section)
//!
//! ```toml
//! [backends]
//! timeout_seconds = 300
//! probe_timeout_seconds = 2
//! cache_file = ".ai_models_cache.json"
//! deep_probe = false
//! turn_delay_ms = 1000
//!
//! [[backends.custom]]
//! id = "local"
//! display_name = "Local Llama"
//! command = ["ollama", "run", "llama3"]
//! probe = ["ollama", "--version"]
//! ```

use super::ConfigValidationError;
use crate::backends::{BackendCatalog, BackendSpec, ProbeSettings};
use debate_domain::BackendId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendsConfig {
    /// Bound on one generation call
    pub timeout_seconds: u64,
    /// Bound on one availability probe
    pub probe_timeout_seconds: u64,
    /// Availability cache location
    pub cache_file: PathBuf,
    /// Also try a tiny generation call while probing
    pub deep_probe: bool,
    /// Pause between turns, in milliseconds
    pub turn_delay_ms: u64,
    /// Extra backends beyond the built-in catalog
    pub custom: Vec<FileCustomBackend>,
}

impl Default for FileBackendsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 300,
            probe_timeout_seconds: 2,
            cache_file: PathBuf::from(".ai_models_cache.json"),
            deep_probe: false,
            turn_delay_ms: 1000,
            custom: Vec::new(),
        }
    }
}

/// One `[[backends.custom]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCustomBackend {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Program and arguments; the prompt is written to stdin
    pub command: Vec<String>,
    #[serde(default)]
    pub probe: Vec<String>,
}

impl FileCustomBackend {
    fn to_spec(&self) -> Option<BackendSpec> {
        let id = BackendId::new(&self.id).ok()?;
        if self.command.is_empty() {
            return None;
        }
        Some(BackendSpec {
            display_name: self.display_name.clone().unwrap_or_else(|| id.to_string()),
            id,
            command: self.command.clone(),
            probe: self.probe.clone(),
            install_hint: None,
        })
    }
}

impl FileBackendsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(self.probe_timeout_seconds),
            deep_probe: self.deep_probe,
            ..ProbeSettings::default()
        }
    }

    /// Built-in catalog extended by the valid custom entries
    pub fn catalog(&self) -> BackendCatalog {
        BackendCatalog::builtin().with_custom(self.custom.iter().filter_map(FileCustomBackend::to_spec))
    }

    pub(super) fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        if self.timeout_seconds == 0 {
            errors.push(ConfigValidationError::ZeroTimeout {
                field: "backends.timeout_seconds",
            });
        }
        if self.probe_timeout_seconds == 0 {
            errors.push(ConfigValidationError::ZeroTimeout {
                field: "backends.probe_timeout_seconds",
            });
        }
        for custom in &self.custom {
            if BackendId::new(&custom.id).is_err() {
                errors.push(ConfigValidationError::InvalidBackendId {
                    field: "backends.custom.id",
                    value: custom.id.clone(),
                });
            }
            if custom.command.iter().all(|part| part.trim().is_empty()) {
                errors.push(ConfigValidationError::EmptyCustomCommand {
                    id: custom.id.clone(),
                });
            }
        }
        errors
    }
}
