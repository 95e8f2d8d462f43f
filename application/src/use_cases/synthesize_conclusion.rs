//! Conclusion synthesis
//!
//! One generation call turns every closing proposal into a single
//! integrated conclusion.

use crate::config::DebateParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::normalize_length::{LengthCorrection, LengthNormalizer};
use debate_domain::{BackendId, DebateConfig, DebatePromptTemplate, ParticipantId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Synthesized text and how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub text: String,
    pub backend: BackendId,
    pub correction: Option<LengthCorrection>,
}

/// Backend that writes the conclusion: the configured synthesizer, or the
/// first registered participant's backend
pub fn synthesizer_backend<'a>(config: &'a DebateConfig, params: &'a DebateParams) -> &'a BackendId {
    params
        .synthesizer
        .as_ref()
        .unwrap_or(&config.participants()[0].backend)
}

pub struct ConclusionSynthesizer<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    normalizer: LengthNormalizer<G>,
}

impl<G: LlmGateway + 'static> ConclusionSynthesizer<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            normalizer: LengthNormalizer::new(Arc::clone(&gateway)),
            gateway,
        }
    }

    /// Synthesize the proposals (keyed by participant) into one conclusion.
    ///
    /// The result only goes through length normalization when
    /// `params.conclusion_char_limit` is set; otherwise it is accepted as-is.
    pub async fn synthesize(
        &self,
        config: &DebateConfig,
        proposals: &BTreeMap<ParticipantId, String>,
        params: &DebateParams,
    ) -> Result<Synthesis, GatewayError> {
        let backend = synthesizer_backend(config, params);
        info!(
            "Synthesizing {} proposals with {}",
            proposals.len(),
            backend
        );

        let prompt =
            DebatePromptTemplate::synthesis_prompt(config, proposals, params.conclusion_char_limit);
        let raw = self.gateway.generate(backend, &prompt).await?;

        let (text, correction) = match params.conclusion_char_limit {
            Some(limit) => {
                let normalized = self.normalizer.normalize(backend, raw, limit).await?;
                (normalized.text, normalized.correction)
            }
            None => (raw, None),
        };

        Ok(Synthesis {
            text,
            backend: backend.clone(),
            correction,
        })
    }
}
