//! Configuration file loading for ai-debate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./debate.toml` or `./.debate.toml`
//! 3. Global: `$XDG_CONFIG_HOME/ai-debate/config.toml` (or the platform equivalent)
//! 4. Default values
//!
//! A debate definition (`--debate <file>`) is a separate, non-merged file:
//! see [`DebateFile`].

mod debate_file;
mod file_config;
mod loader;

pub use debate_file::{DebateFile, DebateFileError, FileParticipant};
pub use file_config::{
    ConfigValidationError, FileBackendsConfig, FileConfig, FileCustomBackend, FileDebateConfig,
    FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
