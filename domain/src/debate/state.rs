//! Debate state machine
//!
//! ```text
//! Opening ──► Debating{2} ──► … ──► Debating{R-1} ──► Closing ──► Synthesizing ──► Done
//!    │             │  all participants ready                ▲
//!    │             └────────────────────────────────────────┤
//!    └── max_rounds == 2 ───────────────────────────────────┘
//! ```
//!
//! The state is pure data; the scheduler in the application layer drives
//! it by running one round per state and calling [`DebateState::advance`].

use crate::debate::round::Round;
use serde::{Deserialize, Serialize};

/// First round index after which a consensus poll may run
pub const MIN_POLL_ROUND: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DebateState {
    Opening,
    Debating { round_index: u32 },
    Closing { round_index: u32 },
    Synthesizing,
    Done,
}

impl DebateState {
    /// The round to run in this state, if any
    pub fn round(&self) -> Option<Round> {
        match *self {
            DebateState::Opening => Some(Round::opening()),
            DebateState::Debating { round_index } => Some(Round::debate(round_index)),
            DebateState::Closing { round_index } => Some(Round::closing(round_index)),
            DebateState::Synthesizing | DebateState::Done => None,
        }
    }

    /// Whether a consensus poll follows the round run in this state
    pub fn polls_after_round(&self) -> bool {
        matches!(*self, DebateState::Debating { round_index } if round_index >= MIN_POLL_ROUND)
    }

    /// Next state after the current one completes.
    ///
    /// `all_ready` is the outcome of the consensus poll run after a debate
    /// round (`None` when no poll ran). It can only shorten the debate, never
    /// extend it past `max_rounds - 1`.
    pub fn advance(self, max_rounds: u32, all_ready: Option<bool>) -> DebateState {
        let last_debate_round = max_rounds.saturating_sub(1);
        match self {
            DebateState::Opening => {
                if last_debate_round < 2 {
                    DebateState::Closing { round_index: 2 }
                } else {
                    DebateState::Debating { round_index: 2 }
                }
            }
            DebateState::Debating { round_index } => {
                let consensus = self.polls_after_round() && all_ready == Some(true);
                if consensus || round_index >= last_debate_round {
                    DebateState::Closing {
                        round_index: round_index + 1,
                    }
                } else {
                    DebateState::Debating {
                        round_index: round_index + 1,
                    }
                }
            }
            DebateState::Closing { .. } => DebateState::Synthesizing,
            DebateState::Synthesizing | DebateState::Done => DebateState::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, DebateState::Done)
    }
}
