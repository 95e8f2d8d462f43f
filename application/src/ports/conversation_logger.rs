//! Port for the machine-readable debate event log.
//!
//! `tracing` carries the diagnostic messages. This port records what was
//! said and decided during a session as [`DebateEvent`]s, one per turn,
//! length correction, readiness vote and conclusion.

use crate::ports::progress::CorrectionKind;
use debate_domain::{BackendId, Participant, ParticipantId, RoundKind};
use serde::Serialize;

/// One entry of the event log. Serializes with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebateEvent {
    SessionStart {
        topic: String,
        /// File stamp shared by both artifacts
        session: String,
        char_limit: usize,
        max_rounds: u32,
        participants: Vec<Participant>,
    },
    Turn {
        round: u32,
        kind: RoundKind,
        participant: ParticipantId,
        title: String,
        backend: BackendId,
        length: usize,
        content: String,
    },
    LengthCorrection {
        round: u32,
        participant: ParticipantId,
        backend: BackendId,
        correction: CorrectionKind,
        before: usize,
        after: usize,
    },
    Vote {
        round: u32,
        participant: ParticipantId,
        ready: bool,
        answer: String,
    },
    Conclusion {
        backend: BackendId,
        #[serde(skip_serializing_if = "Option::is_none")]
        correction: Option<CorrectionKind>,
        content: String,
    },
}

impl DebateEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DebateEvent::SessionStart { .. } => "session_start",
            DebateEvent::Turn { .. } => "turn",
            DebateEvent::LengthCorrection { .. } => "length_correction",
            DebateEvent::Vote { .. } => "vote",
            DebateEvent::Conclusion { .. } => "conclusion",
        }
    }
}

/// Sink for [`DebateEvent`]s.
///
/// Synchronous and infallible: a failed log write must not abort a debate.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: &DebateEvent);
}

pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: &DebateEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = DebateEvent::Vote {
            round: 3,
            participant: ParticipantId::new(1),
            ready: false,
            answer: "NO, not yet".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.kind());
        assert_eq!(value["round"], 3);
        assert_eq!(value["ready"], false);
        assert_eq!(value["answer"], "NO, not yet");
    }

    #[test]
    fn test_conclusion_omits_missing_correction() {
        let event = DebateEvent::Conclusion {
            backend: BackendId::new("claude").unwrap(),
            correction: None,
            content: "Agreed plan".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "conclusion");
        assert!(value.get("correction").is_none());
    }
}
