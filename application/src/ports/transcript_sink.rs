//! Transcript sink port
//!
//! The scheduler reports every structural step of a session to a sink;
//! the sink decides how to persist it (Markdown files, nothing, ...).

use debate_domain::{
    ArtifactNames, Conclusion, DebateConfig, Participant, Round, Transcript, Utterance,
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcript event out of order: {0}")]
    OutOfOrder(String),
}

/// A structural step of a debate session
#[derive(Debug)]
pub enum TranscriptEvent<'a> {
    SessionStarted {
        config: &'a DebateConfig,
        artifacts: &'a ArtifactNames,
    },
    RoundStarted {
        round: Round,
    },
    UtteranceRecorded {
        speaker: &'a Participant,
        utterance: &'a Utterance,
    },
    ConclusionReached {
        config: &'a DebateConfig,
        artifacts: &'a ArtifactNames,
        transcript: &'a Transcript,
        conclusion: &'a Conclusion,
    },
}

impl TranscriptEvent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptEvent::SessionStarted { .. } => "session_started",
            TranscriptEvent::RoundStarted { .. } => "round_started",
            TranscriptEvent::UtteranceRecorded { .. } => "utterance_recorded",
            TranscriptEvent::ConclusionReached { .. } => "conclusion_reached",
        }
    }
}

/// Port for persisting transcript events as they happen
pub trait TranscriptSink: Send + Sync {
    fn record(&self, event: &TranscriptEvent<'_>) -> Result<(), TranscriptError>;

    /// Paths written so far, if the sink writes files
    fn written_files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Sink that discards every event
pub struct NoTranscript;

impl TranscriptSink for NoTranscript {
    fn record(&self, _event: &TranscriptEvent<'_>) -> Result<(), TranscriptError> {
        Ok(())
    }
}
