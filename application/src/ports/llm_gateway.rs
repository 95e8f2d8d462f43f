//! LLM Gateway port
//!
//! Defines the interface for requesting text from a generation backend.

use async_trait::async_trait;
use debate_domain::BackendId;
use thiserror::Error;

/// Errors that can occur during a generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Backend '{backend}' timed out after {seconds}s")]
    Timeout { backend: String, seconds: u64 },

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Backend '{0}' returned an empty response")]
    EmptyResponse(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout { .. })
    }
}

/// Gateway for text generation
///
/// One call, one prompt, one answer: the debate keeps its own history and
/// sends it in full with every prompt. Implementations (adapters) live in
/// the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate text for `prompt` with the given backend
    async fn generate(&self, backend: &BackendId, prompt: &str) -> Result<String, GatewayError>;
}
