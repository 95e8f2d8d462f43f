//! Round value objects

use serde::{Deserialize, Serialize};

/// Kind of a debate round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundKind {
    /// Round 1: each participant states an initial position
    Opening,
    /// Rebuttal, questions and search for common ground
    Debate,
    /// Final round: each participant proposes a conclusion
    Closing,
}

impl RoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundKind::Opening => "opening",
            RoundKind::Debate => "debate",
            RoundKind::Closing => "closing",
        }
    }
}

impl std::fmt::Display for RoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A numbered round (Value Object)
///
/// Round indices are 1-based: the opening round is always round 1 and
/// debate round `k` is round `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    pub index: u32,
    pub kind: RoundKind,
}

impl Round {
    pub fn opening() -> Self {
        Self {
            index: 1,
            kind: RoundKind::Opening,
        }
    }

    pub fn debate(index: u32) -> Self {
        Self {
            index,
            kind: RoundKind::Debate,
        }
    }

    pub fn closing(index: u32) -> Self {
        Self {
            index,
            kind: RoundKind::Closing,
        }
    }

    /// Heading used in transcripts, e.g. `Round 3: Debate 2`
    pub fn label(&self) -> String {
        match self.kind {
            RoundKind::Opening => format!("Round {}: Initial statements", self.index),
            RoundKind::Debate => format!("Round {}: Debate {}", self.index, self.index - 1),
            RoundKind::Closing => format!("Round {}: Closing proposals", self.index),
        }
    }
}
