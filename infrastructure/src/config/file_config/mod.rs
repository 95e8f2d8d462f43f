//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backends;
mod debate;
mod output;

pub use backends::{FileBackendsConfig, FileCustomBackend};
pub use debate::FileDebateConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use debate_domain::{MAX_PARTICIPANTS, MIN_PARTICIPANTS, MIN_ROUNDS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem found by [`FileConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroTimeout { field: &'static str },

    #[error("debate.char_limit cannot be 0")]
    InvalidCharLimit,

    #[error("debate.max_rounds must be at least {min}, got {actual}")]
    TooFewRounds { min: u32, actual: u32 },

    #[error("debate.participants must be between {min} and {max}, got {actual}")]
    ParticipantCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("debate.{field}: invalid backend id '{value}'")]
    InvalidBackendId { field: &'static str, value: String },

    #[error("custom backend '{id}' has an empty command")]
    EmptyCustomCommand { id: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate defaults
    pub debate: FileDebateConfig,
    /// Backend invocation and discovery
    pub backends: FileBackendsConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let debate = &self.debate;

        if debate.char_limit == 0 {
            errors.push(ConfigValidationError::InvalidCharLimit);
        }
        if debate.conclusion_char_limit == Some(0) {
            errors.push(ConfigValidationError::InvalidCharLimit);
        }
        if debate.max_rounds < MIN_ROUNDS {
            errors.push(ConfigValidationError::TooFewRounds {
                min: MIN_ROUNDS,
                actual: debate.max_rounds,
            });
        }
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&debate.participants) {
            errors.push(ConfigValidationError::ParticipantCount {
                min: MIN_PARTICIPANTS,
                max: MAX_PARTICIPANTS,
                actual: debate.participants,
            });
        }
        if let Err(value) = debate.parse_synthesizer() {
            errors.push(ConfigValidationError::InvalidBackendId {
                field: "synthesizer",
                value,
            });
        }

        errors.extend(self.backends.validate());
        errors
    }
}
