//! Utterances and the session transcript

use crate::core::string::char_len;
use crate::debate::participant::ParticipantId;
use crate::debate::round::{Round, RoundKind};
use crate::debate::timestamp::SessionTimestamp;
use serde::Serialize;

/// One speaking turn (Value Object)
///
/// Created exactly once per turn, after any length correction, and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub round_index: u32,
    pub round_kind: RoundKind,
    pub speaker: ParticipantId,
    pub content: String,
    /// Length of `content` in characters
    pub length: usize,
}

impl Utterance {
    pub fn new(round: Round, speaker: ParticipantId, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            round_index: round.index,
            round_kind: round.kind,
            speaker,
            length: char_len(&content),
            content,
        }
    }

    pub fn round(&self) -> Round {
        Round {
            index: self.round_index,
            kind: self.round_kind,
        }
    }
}

/// Ordered record of everything said in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    session_timestamp: SessionTimestamp,
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new(session_timestamp: SessionTimestamp) -> Self {
        Self {
            session_timestamp,
            utterances: Vec::new(),
        }
    }

    pub fn session_timestamp(&self) -> &SessionTimestamp {
        &self.session_timestamp
    }

    /// Append an utterance in emission order
    pub fn push(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Utterances of one round, in speaking order
    pub fn in_round(&self, round_index: u32) -> impl Iterator<Item = &Utterance> {
        self.utterances
            .iter()
            .filter(move |u| u.round_index == round_index)
    }

    /// Closing proposals, in speaking order
    pub fn closing(&self) -> impl Iterator<Item = &Utterance> {
        self.utterances
            .iter()
            .filter(|u| u.round_kind == RoundKind::Closing)
    }

    /// Distinct rounds in the order they were run
    pub fn rounds(&self) -> Vec<Round> {
        let mut rounds: Vec<Round> = Vec::new();
        for u in &self.utterances {
            if rounds.last().map(|r| r.index) != Some(u.round_index) {
                rounds.push(u.round());
            }
        }
        rounds
    }

    /// Number of debate rounds between opening and closing
    pub fn debate_rounds_run(&self) -> usize {
        self.rounds()
            .iter()
            .filter(|r| r.kind == RoundKind::Debate)
            .count()
    }
}
