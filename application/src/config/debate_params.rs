//! Debate parameters: scheduler loop control.
//!
//! [`DebateParams`] groups the knobs of
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase) that
//! are not part of the debate definition itself.

use debate_domain::BackendId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scheduler control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateParams {
    /// Pause between consecutive turns.
    pub turn_delay: Duration,
    /// After a failed poll, let holdouts speak first in the next round.
    pub dissenters_first: bool,
    /// Character limit for the synthesized conclusion; `None` accepts it as-is.
    pub conclusion_char_limit: Option<usize>,
    /// Backend that writes the conclusion; defaults to the first participant's.
    pub synthesizer: Option<BackendId>,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            turn_delay: Duration::from_millis(1000),
            dissenters_first: false,
            conclusion_char_limit: None,
            synthesizer: None,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = delay;
        self
    }

    pub fn with_dissenters_first(mut self, enabled: bool) -> Self {
        self.dissenters_first = enabled;
        self
    }

    pub fn with_conclusion_char_limit(mut self, limit: Option<usize>) -> Self {
        self.conclusion_char_limit = limit;
        self
    }

    pub fn with_synthesizer(mut self, backend: Option<BackendId>) -> Self {
        self.synthesizer = backend;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DebateParams::default();
        assert_eq!(params.turn_delay, Duration::from_secs(1));
        assert!(!params.dissenters_first);
        assert!(params.conclusion_char_limit.is_none());
        assert!(params.synthesizer.is_none());
    }

    #[test]
    fn test_builder() {
        let params = DebateParams::default()
            .with_turn_delay(Duration::ZERO)
            .with_dissenters_first(true)
            .with_conclusion_char_limit(Some(1000))
            .with_synthesizer(Some(BackendId::new("gemini").unwrap()));
        assert_eq!(params.turn_delay, Duration::ZERO);
        assert!(params.dissenters_first);
        assert_eq!(params.conclusion_char_limit, Some(1000));
        assert_eq!(params.synthesizer.unwrap().as_str(), "gemini");
    }
}
