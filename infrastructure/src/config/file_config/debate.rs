//! Debate defaults from TOML (`[debate]` section)
//!
//! ```toml
//! [debate]
//! char_limit = 500
//! max_rounds = 5
//! participants = 2
//! dissenters_first = false
//! conclusion_char_limit = 1500
//! synthesizer = "claude"
//! output_dir = "debates"
//! ```

use debate_domain::BackendId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Target length of every utterance, in characters
    pub char_limit: usize,
    /// Total rounds including opening and closing
    pub max_rounds: u32,
    /// Participant count asked for in interactive setup
    pub participants: usize,
    /// Let holdouts of a failed poll speak first next round
    pub dissenters_first: bool,
    pub conclusion_char_limit: Option<usize>,
    /// Backend id that writes the conclusion
    pub synthesizer: Option<String>,
    /// Where transcript files are written
    pub output_dir: PathBuf,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            char_limit: 500,
            max_rounds: 5,
            participants: 2,
            dissenters_first: false,
            conclusion_char_limit: None,
            synthesizer: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl FileDebateConfig {
    /// Parse `synthesizer`; the error carries the offending value.
    pub fn parse_synthesizer(&self) -> Result<Option<BackendId>, String> {
        self.synthesizer
            .as_deref()
            .map(|s| BackendId::new(s).map_err(|_| s.to_string()))
            .transpose()
    }
}
