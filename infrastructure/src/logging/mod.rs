//! Structured debate event log
//!
//! [`JsonlEventLog`] implements the
//! [`ConversationLogger`](debate_application::ConversationLogger) port by
//! appending one JSON object per event to a file.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLog;
