//! Setup Debate use case
//!
//! Turns raw answers from a configuration source (interactive prompts or a
//! debate file) into a validated [`DebateConfig`]: checks every backend,
//! including a configured synthesizer, against the availability registry,
//! fills in missing titles and classifies stances.

use crate::ports::availability::AvailabilityRegistry;
use crate::ports::llm_gateway::LlmGateway;
use debate_domain::core::string::take_chars;
use debate_domain::{
    BackendId, DebateConfig, DebatePromptTemplate, DomainError, MAX_PARTICIPANTS,
    MIN_PARTICIPANTS, Participant, ParticipantId, StanceCategory, Topic, TopicSlug,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Longest generated participant title, in characters
pub const MAX_TITLE_CHARS: usize = 30;

#[derive(Error, Debug)]
pub enum SetupDebateError {
    #[error("Invalid debate: {0}")]
    InvalidConfig(#[from] DomainError),

    #[error("Participant {index}: backend '{backend}' is not available (available: {available})")]
    BackendUnavailable {
        index: usize,
        backend: BackendId,
        available: String,
    },

    #[error("Synthesizer backend '{backend}' is not available (available: {available})")]
    SynthesizerUnavailable { backend: BackendId, available: String },
}

/// One participant as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub position: String,
    pub backend: BackendId,
    pub title: Option<String>,
    pub stance: Option<StanceCategory>,
}

impl ParticipantDraft {
    pub fn new(position: impl Into<String>, backend: BackendId) -> Self {
        Self {
            position: position.into(),
            backend,
            title: None,
            stance: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_stance(mut self, stance: StanceCategory) -> Self {
        self.stance = Some(stance);
        self
    }
}

/// Input for the SetupDebate use case
#[derive(Debug, Clone)]
pub struct SetupDebateInput {
    pub topic: String,
    pub char_limit: usize,
    pub max_rounds: u32,
    pub participants: Vec<ParticipantDraft>,
    /// Backend that will write the conclusion, when not the first participant's
    pub synthesizer: Option<BackendId>,
}

impl SetupDebateInput {
    pub fn with_synthesizer(mut self, synthesizer: Option<BackendId>) -> Self {
        self.synthesizer = synthesizer;
        self
    }
}

pub struct SetupDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> SetupDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validate the drafts and build the debate configuration
    pub async fn execute(
        &self,
        input: SetupDebateInput,
        registry: &dyn AvailabilityRegistry,
    ) -> Result<DebateConfig, SetupDebateError> {
        let topic = Topic::new(input.topic)?;
        let count = input.participants.len();
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&count) {
            return Err(DomainError::ParticipantCount {
                min: MIN_PARTICIPANTS,
                max: MAX_PARTICIPANTS,
                actual: count,
            }
            .into());
        }

        for (index, draft) in input.participants.iter().enumerate() {
            if !registry.is_available(&draft.backend) {
                return Err(SetupDebateError::BackendUnavailable {
                    index: index + 1,
                    backend: draft.backend.clone(),
                    available: available_list(registry),
                });
            }
            if draft.position.trim().is_empty() {
                return Err(DomainError::EmptyPosition { index }.into());
            }
        }
        if let Some(synthesizer) = &input.synthesizer
            && !registry.is_available(synthesizer)
        {
            return Err(SetupDebateError::SynthesizerUnavailable {
                backend: synthesizer.clone(),
                available: available_list(registry),
            });
        }

        let title_backend = input.participants[0].backend.clone();
        let mut participants = Vec::with_capacity(count);
        for (index, draft) in input.participants.into_iter().enumerate() {
            let title = match draft.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => take_chars(title, MAX_TITLE_CHARS).to_string(),
                _ => {
                    self.generate_title(&title_backend, &topic, &draft.position, index)
                        .await
                }
            };
            let position = draft.position.trim().to_string();
            let mut participant =
                Participant::new(ParticipantId::new(index), title, position, draft.backend);
            if let Some(stance) = draft.stance {
                participant = participant.with_stance(stance);
            }
            debug!(
                "Participant {}: {} ({}, {})",
                index + 1,
                participant.title,
                participant.backend,
                participant.stance
            );
            participants.push(participant);
        }

        let config = DebateConfig::new(topic, input.char_limit, input.max_rounds, participants)?;
        info!(
            "Debate configured: {} participants, {} chars, {} rounds",
            config.participants().len(),
            config.char_limit(),
            config.max_rounds()
        );
        Ok(config)
    }

    /// Ask a backend for a short title; falls back to `Participant N`
    pub async fn generate_title(
        &self,
        backend: &BackendId,
        topic: &Topic,
        position: &str,
        index: usize,
    ) -> String {
        let fallback = || format!("Participant {}", index + 1);
        let prompt = DebatePromptTemplate::title_prompt(topic.content(), position);
        match self.gateway.generate(backend, &prompt).await {
            Ok(answer) => clean_title(&answer).unwrap_or_else(fallback),
            Err(e) => {
                warn!("Title generation failed for participant {}: {}", index + 1, e);
                fallback()
            }
        }
    }

    /// Filename keyword for the debate, asked of the first participant's backend
    pub async fn topic_slug(&self, config: &DebateConfig) -> TopicSlug {
        let backend = &config.participants()[0].backend;
        let topic = config.topic().content();
        let prompt = DebatePromptTemplate::slug_prompt(topic);
        match self.gateway.generate(backend, &prompt).await {
            Ok(answer) => TopicSlug::sanitize(&answer).unwrap_or_else(|| {
                warn!("Unusable slug answer {:?}, deriving from topic", answer);
                TopicSlug::from_topic(topic)
            }),
            Err(e) => {
                warn!("Slug generation failed: {}", e);
                TopicSlug::from_topic(topic)
            }
        }
    }
}

fn available_list(registry: &dyn AvailabilityRegistry) -> String {
    registry
        .available_backends()
        .iter()
        .map(BackendId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// First non-empty line, without quotes or markdown emphasis, capped in length
fn clean_title(answer: &str) -> Option<String> {
    let line = answer.lines().map(str::trim).find(|l| !l.is_empty())?;
    let title = line
        .trim_start_matches(|c: char| c == '#' || c == '-')
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '*' || c == '`')
        .trim();
    if title.is_empty() {
        return None;
    }
    Some(take_chars(title, MAX_TITLE_CHARS).trim_end().to_string())
}
