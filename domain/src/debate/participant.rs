//! Participant entity and stance categories

use crate::core::backend::BackendId;
use serde::{Deserialize, Serialize};

/// Identifier of a participant (Value Object)
///
/// Equal to the participant's registration index, so ordering by id is
/// ordering by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(usize);

impl ParticipantId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based registration index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

const DISAGREE_KEYWORDS: &[&str] = &[
    "oppose", "against", "reject", "disagree", "problem", "반대", "거부", "부정", "문제",
];

const AGREE_KEYWORDS: &[&str] = &[
    "support", "agree", "favor", "for ", "찬성", "긍정", "동의", "지지",
];

/// Broad stance of a participant toward the topic
///
/// Determines speaking order: dissenters speak first, then supporters,
/// then everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceCategory {
    Disagree,
    Agree,
    NeutralOrOther,
}

impl StanceCategory {
    /// Classify a free-form position statement by keyword.
    ///
    /// Opposition keywords win over support keywords, so
    /// "I disagree with the supporters" is a dissent.
    pub fn classify(position: &str) -> Self {
        let lower = position.to_lowercase();
        if DISAGREE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            StanceCategory::Disagree
        } else if AGREE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            StanceCategory::Agree
        } else {
            StanceCategory::NeutralOrOther
        }
    }

    /// Bucket rank used by the ordering policy (lower speaks earlier)
    pub fn speaking_rank(&self) -> u8 {
        match self {
            StanceCategory::Disagree => 0,
            StanceCategory::Agree => 1,
            StanceCategory::NeutralOrOther => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StanceCategory::Disagree => "disagree",
            StanceCategory::Agree => "agree",
            StanceCategory::NeutralOrOther => "neutral",
        }
    }
}

impl std::fmt::Display for StanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StanceCategory {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disagree" | "oppose" | "against" => Ok(StanceCategory::Disagree),
            "agree" | "support" | "for" => Ok(StanceCategory::Agree),
            "neutral" | "neutral_or_other" | "other" => Ok(StanceCategory::NeutralOrOther),
            other => Err(crate::core::error::DomainError::UnknownStance(
                other.to_string(),
            )),
        }
    }
}

const MARKERS: &[&str] = &["🔵", "🟡", "🟢", "🔴", "🟣", "🟠", "⚪", "⚫", "🟤", "🔷"];

/// A debate party bound to a position and a generation backend (Entity)
///
/// Created once during setup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub title: String,
    pub position: String,
    pub backend: BackendId,
    pub stance: StanceCategory,
}

impl Participant {
    /// Create a participant whose stance is classified from the position
    pub fn new(
        id: ParticipantId,
        title: impl Into<String>,
        position: impl Into<String>,
        backend: BackendId,
    ) -> Self {
        let position = position.into();
        let stance = StanceCategory::classify(&position);
        Self {
            id,
            title: title.into(),
            position,
            backend,
            stance,
        }
    }

    /// Override the classified stance
    pub fn with_stance(mut self, stance: StanceCategory) -> Self {
        self.stance = stance;
        self
    }

    /// Colored marker distinguishing participants in transcripts and on screen
    pub fn marker(&self) -> &'static str {
        MARKERS[self.id.index() % MARKERS.len()]
    }
}
