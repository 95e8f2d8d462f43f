//! Application layer for ai-debate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DebateParams;
pub use ports::{
    availability::{AvailabilityRegistry, StaticAvailability},
    conversation_logger::{ConversationLogger, DebateEvent, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{CorrectionKind, NoProgress, ProgressNotifier},
    transcript_sink::{NoTranscript, TranscriptError, TranscriptEvent, TranscriptSink},
};
pub use use_cases::consensus_poll::ConsensusPoller;
pub use use_cases::normalize_length::{
    LengthCorrection, LengthNormalizer, NormalizedText, normalize_length,
};
pub use use_cases::run_debate::{DebateOutcome, RunDebateError, RunDebateInput, RunDebateUseCase};
pub use use_cases::setup_debate::{
    ParticipantDraft, SetupDebateError, SetupDebateInput, SetupDebateUseCase,
};
pub use use_cases::synthesize_conclusion::{ConclusionSynthesizer, Synthesis, synthesizer_backend};
