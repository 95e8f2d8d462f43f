//! Scripted mocks shared by the use case tests

use crate::ports::conversation_logger::{ConversationLogger, DebateEvent};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::transcript_sink::{TranscriptError, TranscriptEvent, TranscriptSink};
use async_trait::async_trait;
use debate_domain::{BackendId, DebateConfig, Participant, ParticipantId, Topic};
use std::sync::Mutex;

type Responder = dyn Fn(&BackendId, &str) -> Result<String, GatewayError> + Send + Sync;

/// Kind of prompt, recognised by its fixed wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Turn,
    Expand,
    Summarize,
    Consensus,
    Synthesis,
    Title,
    Slug,
}

impl PromptKind {
    pub fn of(prompt: &str) -> Self {
        if prompt.contains("is too short") {
            PromptKind::Expand
        } else if prompt.contains("is too long") {
            PromptKind::Summarize
        } else if prompt.contains("answer with exactly one word, YES or NO") {
            PromptKind::Consensus
        } else if prompt.contains("integrated final conclusion") {
            PromptKind::Synthesis
        } else if prompt.contains("short title that represents") {
            PromptKind::Title
        } else if prompt.contains("usable as a filename") {
            PromptKind::Slug
        } else {
            PromptKind::Turn
        }
    }
}

/// Gateway that answers through a closure and records every call
pub struct ScriptedGateway {
    responder: Box<Responder>,
    calls: Mutex<Vec<(BackendId, String)>>,
}

impl ScriptedGateway {
    pub fn new(
        responder: impl Fn(&BackendId, &str) -> Result<String, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every turn with a fixed-length text and every poll with `vote`
    pub fn debating(turn_len: usize, vote: &'static str) -> Self {
        Self::new(move |_, prompt| {
            Ok(match PromptKind::of(prompt) {
                PromptKind::Consensus => vote.to_string(),
                PromptKind::Synthesis => "## Conclusion\nMeet in the middle.".to_string(),
                _ => "x".repeat(turn_len),
            })
        })
    }

    pub fn calls(&self) -> Vec<(BackendId, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, p)| PromptKind::of(p) == kind)
            .count()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(&self, backend: &BackendId, prompt: &str) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((backend.clone(), prompt.to_string()));
        (self.responder)(backend, prompt)
    }
}

/// Sink that keeps a textual trace of every event
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl TranscriptSink for RecordingSink {
    fn record(&self, event: &TranscriptEvent<'_>) -> Result<(), TranscriptError> {
        let line = match event {
            TranscriptEvent::SessionStarted { artifacts, .. } => {
                format!("session:{}", artifacts.transcript_file())
            }
            TranscriptEvent::RoundStarted { round } => format!("round:{}", round.index),
            TranscriptEvent::UtteranceRecorded { speaker, .. } => {
                format!("utterance:{}", speaker.title)
            }
            TranscriptEvent::ConclusionReached { artifacts, .. } => {
                format!("conclusion:{}", artifacts.conclusion_file())
            }
        };
        self.events.lock().unwrap().push(line);
        Ok(())
    }
}

/// Logger that keeps event types
#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<&'static str>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: &DebateEvent) {
        self.events.lock().unwrap().push(event.kind());
    }
}

pub fn backend(name: &str) -> BackendId {
    BackendId::new(name).unwrap()
}

/// Config with one participant per `(title, position, backend)`
pub fn config(max_rounds: u32, participants: &[(&str, &str, &str)]) -> DebateConfig {
    let participants = participants
        .iter()
        .enumerate()
        .map(|(i, (title, position, b))| {
            Participant::new(ParticipantId::new(i), *title, *position, backend(b))
        })
        .collect();
    DebateConfig::new(
        Topic::new("Is remote work more productive?").unwrap(),
        400,
        max_rounds,
        participants,
    )
    .unwrap()
}
