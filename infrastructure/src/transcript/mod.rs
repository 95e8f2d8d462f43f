//! Markdown transcript artifacts
//!
//! [`MarkdownTranscriptWriter`] implements the
//! [`TranscriptSink`](debate_application::TranscriptSink) port: the full
//! transcript file grows as the debate runs, the conclusion file is written
//! once at the end.

mod markdown;

pub use markdown::MarkdownTranscriptWriter;
