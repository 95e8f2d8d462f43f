//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised when a debate definition violates one of the structural rules
/// (participant count, round limit, character budget).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Debate topic cannot be empty")]
    EmptyTopic,

    #[error("Participant {index} has an empty position statement")]
    EmptyPosition { index: usize },

    #[error("A debate needs between {min} and {max} participants, got {actual}")]
    ParticipantCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Character limit must be greater than zero")]
    InvalidCharLimit,

    #[error("A debate needs at least {min} rounds, got {actual}")]
    TooFewRounds { min: u32, actual: u32 },

    #[error("Invalid backend identifier: {0:?}")]
    InvalidBackend(String),

    #[error("Unknown stance category: {0}")]
    UnknownStance(String),
}

impl DomainError {
    /// Whether the error concerns the participant roster
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyPosition { .. } | DomainError::ParticipantCount { .. }
        )
    }
}
