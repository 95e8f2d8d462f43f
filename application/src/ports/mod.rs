//! Port definitions (interfaces for external dependencies)

pub mod availability;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod transcript_sink;
