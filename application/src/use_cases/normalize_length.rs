//! Length normalization of a single generated response
//!
//! A response outside `[char_limit / 4, char_limit]` gets exactly one
//! follow-up request: expand when too short, summarize when too long. The
//! follow-up's output is adopted whatever its length.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::CorrectionKind;
use debate_domain::core::string::char_len;
use debate_domain::{BackendId, DebatePromptTemplate, LengthVerdict};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// A correction that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthCorrection {
    pub kind: CorrectionKind,
    pub before: usize,
    pub after: usize,
}

/// Final text of a turn plus the correction applied to it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub correction: Option<LengthCorrection>,
}

/// Normalize `raw` against `char_limit`.
///
/// `generate_more` and `generate_less` receive the follow-up prompt; at most
/// one of them is called, at most once.
pub async fn normalize_length<M, FM, L, FL, E>(
    raw: String,
    char_limit: usize,
    generate_more: M,
    generate_less: L,
) -> Result<NormalizedText, E>
where
    M: FnOnce(String) -> FM,
    FM: Future<Output = Result<String, E>>,
    L: FnOnce(String) -> FL,
    FL: Future<Output = Result<String, E>>,
{
    let (kind, text) = match LengthVerdict::assess(&raw, char_limit) {
        LengthVerdict::Acceptable { .. } => {
            return Ok(NormalizedText {
                text: raw,
                correction: None,
            });
        }
        LengthVerdict::TooShort { length, floor } => {
            debug!("Response too short ({} < {}), requesting expansion", length, floor);
            let prompt = DebatePromptTemplate::expand_prompt(&raw, length, floor, char_limit);
            (CorrectionKind::Expanded, generate_more(prompt).await?)
        }
        LengthVerdict::TooLong { length, limit } => {
            debug!("Response too long ({} > {}), requesting summary", length, limit);
            let prompt = DebatePromptTemplate::summarize_prompt(&raw, length, limit);
            (CorrectionKind::Summarized, generate_less(prompt).await?)
        }
    };

    Ok(NormalizedText {
        correction: Some(LengthCorrection {
            kind,
            before: char_len(&raw),
            after: char_len(&text),
        }),
        text,
    })
}

/// Length normalizer bound to a gateway
///
/// Follow-up requests go to the same backend that produced the response.
pub struct LengthNormalizer<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> LengthNormalizer<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn normalize(
        &self,
        backend: &BackendId,
        raw: String,
        char_limit: usize,
    ) -> Result<NormalizedText, GatewayError> {
        let gateway = self.gateway.as_ref();
        normalize_length(
            raw,
            char_limit,
            move |prompt| async move { gateway.generate(backend, &prompt).await },
            move |prompt| async move { gateway.generate(backend, &prompt).await },
        )
        .await
    }
}
