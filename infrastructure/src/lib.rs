//! Infrastructure layer for ai-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod backends;
pub mod config;
pub mod logging;
pub mod transcript;

// Re-export commonly used types
pub use backends::{
    AvailabilityCache, BackendCatalog, BackendSpec, CliBackendRegistry, CliLlmGateway,
    ProbeSettings, RegistryError,
};
pub use config::{
    ConfigLoader, ConfigValidationError, DebateFile, DebateFileError, FileBackendsConfig,
    FileConfig, FileCustomBackend, FileDebateConfig, FileOutputConfig, FileOutputFormat,
    FileParticipant,
};
pub use logging::JsonlEventLog;
pub use transcript::MarkdownTranscriptWriter;
