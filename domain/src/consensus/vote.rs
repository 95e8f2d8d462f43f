//! Readiness votes

use crate::debate::participant::ParticipantId;
use serde::Serialize;

/// One participant's answer to "are you ready to conclude?"
///
/// Ephemeral: never recorded in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusVote {
    pub round_index: u32,
    pub participant: ParticipantId,
    pub ready: bool,
    /// Raw backend answer, or the error text when the call failed
    pub raw: String,
}

impl ConsensusVote {
    pub fn new(
        round_index: u32,
        participant: ParticipantId,
        ready: bool,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            round_index,
            participant,
            ready,
            raw: raw.into(),
        }
    }
}

/// All votes of one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusPoll {
    pub round_index: u32,
    pub votes: Vec<ConsensusVote>,
}

impl ConsensusPoll {
    pub fn new(round_index: u32, votes: Vec<ConsensusVote>) -> Self {
        Self { round_index, votes }
    }

    /// True iff there is at least one vote and every vote is ready
    pub fn all_ready(&self) -> bool {
        !self.votes.is_empty() && self.votes.iter().all(|v| v.ready)
    }

    pub fn ready_count(&self) -> usize {
        self.votes.iter().filter(|v| v.ready).count()
    }

    pub fn is_ready(&self, participant: ParticipantId) -> bool {
        self.votes
            .iter()
            .any(|v| v.participant == participant && v.ready)
    }

    /// Participants who want to keep debating
    pub fn holdouts(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.votes.iter().filter(|v| !v.ready).map(|v| v.participant)
    }

    /// Compact summary like `[●●○]`
    pub fn vote_summary(&self) -> String {
        let marks: String = self
            .votes
            .iter()
            .map(|v| if v.ready { '●' } else { '○' })
            .collect();
        format!("[{}]", marks)
    }
}
