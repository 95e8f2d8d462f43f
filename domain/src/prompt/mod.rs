//! Prompt domain
//!
//! Templates for every generation request the debate issues: turns,
//! length corrections, readiness polls, synthesis and setup helpers.

mod template;

pub use template::DebatePromptTemplate;
