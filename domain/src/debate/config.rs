//! Debate configuration

use crate::core::{error::DomainError, topic::Topic};
use crate::debate::participant::{Participant, ParticipantId};
use serde::Serialize;

/// Minimum number of participants in a debate
pub const MIN_PARTICIPANTS: usize = 2;
/// Maximum number of participants in a debate
pub const MAX_PARTICIPANTS: usize = 10;
/// Minimum number of rounds (opening + closing)
pub const MIN_ROUNDS: u32 = 2;

/// Validated, immutable definition of one debate session
///
/// Participants are kept in registration order; speaking order is derived
/// separately by [`crate::policy::ordering::speaking_order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateConfig {
    topic: Topic,
    char_limit: usize,
    max_rounds: u32,
    participants: Vec<Participant>,
}

impl DebateConfig {
    pub fn new(
        topic: Topic,
        char_limit: usize,
        max_rounds: u32,
        participants: Vec<Participant>,
    ) -> Result<Self, DomainError> {
        if char_limit == 0 {
            return Err(DomainError::InvalidCharLimit);
        }
        if max_rounds < MIN_ROUNDS {
            return Err(DomainError::TooFewRounds {
                min: MIN_ROUNDS,
                actual: max_rounds,
            });
        }
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&participants.len()) {
            return Err(DomainError::ParticipantCount {
                min: MIN_PARTICIPANTS,
                max: MAX_PARTICIPANTS,
                actual: participants.len(),
            });
        }
        if let Some(index) = participants
            .iter()
            .position(|p| p.position.trim().is_empty())
        {
            return Err(DomainError::EmptyPosition { index });
        }

        // Ids always mirror registration order
        let participants = participants
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                p.id = ParticipantId::new(i);
                p
            })
            .collect();

        Ok(Self {
            topic,
            char_limit,
            max_rounds,
            participants,
        })
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Participants in registration order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    /// Upper bound on the number of debate rounds between opening and closing
    pub fn max_debate_rounds(&self) -> u32 {
        self.max_rounds - MIN_ROUNDS
    }
}
