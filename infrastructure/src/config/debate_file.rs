//! Non-interactive debate definition (`--debate <file.toml>`)
//!
//! ```toml
//! topic = "Is remote work more productive than office work?"
//! char_limit = 400   # optional, falls back to [debate].char_limit
//! max_rounds = 4     # optional
//!
//! [[participant]]
//! position = "Remote work boosts focus and output"
//! backend = "claude"
//! title = "Remote Advocate"   # optional, generated when missing
//!
//! [[participant]]
//! position = "Office work is better for collaboration"
//! backend = "gemini"
//! stance = "disagree"         # optional, classified when missing
//! ```

use super::file_config::FileDebateConfig;
use debate_application::{ParticipantDraft, SetupDebateInput};
use debate_domain::{BackendId, StanceCategory};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebateFileError {
    #[error("Failed to read debate file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid debate file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Participant {index}: {message}")]
    InvalidParticipant { index: usize, message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileParticipant {
    pub position: String,
    pub backend: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub stance: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DebateFile {
    pub topic: String,
    #[serde(default)]
    pub char_limit: Option<usize>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    #[serde(default, rename = "participant")]
    pub participants: Vec<FileParticipant>,
}

impl DebateFile {
    pub fn load(path: &Path) -> Result<Self, DebateFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| DebateFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| DebateFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Setup input, with limits the file leaves out taken from `defaults`.
    ///
    /// Participant counts and backend availability are checked later by the
    /// setup use case; only values that cannot be represented fail here.
    pub fn into_setup_input(
        self,
        defaults: &FileDebateConfig,
    ) -> Result<SetupDebateInput, DebateFileError> {
        let participants = self
            .participants
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_draft(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SetupDebateInput {
            topic: self.topic,
            char_limit: self.char_limit.unwrap_or(defaults.char_limit),
            max_rounds: self.max_rounds.unwrap_or(defaults.max_rounds),
            participants,
            synthesizer: None,
        })
    }
}

impl FileParticipant {
    fn into_draft(self, index: usize) -> Result<ParticipantDraft, DebateFileError> {
        let invalid = |message: String| DebateFileError::InvalidParticipant { index, message };

        let backend = BackendId::new(&self.backend).map_err(|e| invalid(e.to_string()))?;
        let mut draft = ParticipantDraft::new(self.position, backend);
        if let Some(title) = self.title.filter(|t| !t.trim().is_empty()) {
            draft = draft.with_title(title.trim());
        }
        if let Some(stance) = self.stance {
            let stance = stance
                .parse::<StanceCategory>()
                .map_err(|e| invalid(e.to_string()))?;
            draft = draft.with_stance(stance);
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
topic = "Is remote work more productive?"
max_rounds = 4

[[participant]]
position = "Remote work boosts focus"
backend = "Claude"
title = "Remote Advocate"

[[participant]]
position = "Offices are better for collaboration"
backend = "gemini"
stance = "disagree"
"#;

    #[test]
    fn test_into_setup_input() {
        let file: DebateFile = toml::from_str(EXAMPLE).unwrap();
        let input = file.into_setup_input(&FileDebateConfig::default()).unwrap();

        assert_eq!(input.topic, "Is remote work more productive?");
        assert_eq!(input.char_limit, 500);
        assert_eq!(input.max_rounds, 4);
        assert_eq!(input.participants.len(), 2);
        assert_eq!(input.participants[0].backend.as_str(), "claude");
        assert_eq!(input.participants[0].title.as_deref(), Some("Remote Advocate"));
        assert_eq!(input.participants[0].stance, None);
        assert_eq!(input.participants[1].stance, Some(StanceCategory::Disagree));
    }

    #[test]
    fn test_unknown_stance_names_the_participant() {
        let file: DebateFile = toml::from_str(
            r#"
topic = "t"
[[participant]]
position = "p"
backend = "claude"
stance = "sideways"
"#,
        )
        .unwrap();
        let err = file.into_setup_input(&FileDebateConfig::default()).unwrap_err();
        assert!(matches!(err, DebateFileError::InvalidParticipant { index: 1, .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.toml");
        std::fs::write(&path, EXAMPLE).unwrap();
        assert_eq!(DebateFile::load(&path).unwrap().participants.len(), 2);

        std::fs::write(&path, "participant = 3").unwrap();
        assert!(matches!(
            DebateFile::load(&path),
            Err(DebateFileError::Parse { .. })
        ));
    }
}
