//! Error types for backend discovery

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No text-generation backend is available.\n{hint}")]
    NoBackendsAvailable { hint: String },

    #[error("Failed to write availability cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize availability cache: {0}")]
    CacheFormat(#[from] serde_json::Error),
}
