//! Domain layer for ai-debate
//!
//! This crate contains the core debate concepts and pure policies.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! A debate is a fixed roster of [`Participant`]s, each bound to a position
//! and a text-generation backend, driven through rounds:
//!
//! - **Opening**: every participant states an initial position
//! - **Debate**: rebuttal rounds, each followed by a consensus poll
//! - **Closing**: every participant proposes a conclusion
//!
//! ## Policies
//!
//! - **Ordering**: dissenters speak first, then supporters, then the rest
//! - **Length**: responses outside `[limit / 4, limit]` get one correction

pub mod config;
pub mod consensus;
pub mod core;
pub mod debate;
pub mod policy;
pub mod prompt;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consensus::{ConsensusPoll, ConsensusVote, parse_readiness};
pub use core::{backend::BackendId, error::DomainError, topic::Topic};
pub use debate::{
    artifact::{ArtifactNames, TopicSlug},
    conclusion::Conclusion,
    config::{DebateConfig, MAX_PARTICIPANTS, MIN_PARTICIPANTS, MIN_ROUNDS},
    participant::{Participant, ParticipantId, StanceCategory},
    round::{Round, RoundKind},
    state::DebateState,
    timestamp::SessionTimestamp,
    transcript::{Transcript, Utterance},
};
pub use policy::{
    length::{LengthVerdict, length_floor},
    ordering::{dissenters_first, speaking_order},
};
pub use prompt::DebatePromptTemplate;
