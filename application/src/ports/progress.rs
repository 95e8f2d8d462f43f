//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use debate_domain::{ConsensusPoll, ConsensusVote, Participant, Round, Utterance};

/// Direction of a length correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Expanded,
    Summarized,
}

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer. Every method has a
/// no-op default so reporters only override what they display.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a round starts, with the participants in speaking order
    fn on_round_start(&self, _round: &Round, _order: &[&Participant]) {}

    /// Called before a participant's generation request
    fn on_turn_start(&self, _round: &Round, _speaker: &Participant) {}

    /// Called once the utterance is final
    fn on_turn_complete(&self, _speaker: &Participant, _utterance: &Utterance) {}

    /// Called when a response was sent back for one length correction
    fn on_length_corrected(
        &self,
        _speaker: &Participant,
        _kind: CorrectionKind,
        _before: usize,
        _after: usize,
    ) {
    }

    fn on_poll_start(&self, _round_index: u32) {}

    fn on_vote(&self, _participant: &Participant, _vote: &ConsensusVote) {}

    fn on_poll_complete(&self, _poll: &ConsensusPoll) {}

    fn on_synthesis_start(&self, _synthesizer: &str) {}

    fn on_synthesis_complete(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
