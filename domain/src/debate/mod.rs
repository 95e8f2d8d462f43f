//! Debate domain
//!
//! Entities and value objects describing one debate session: who takes
//! part, how rounds progress, what was said, and how the session's output
//! artifacts are named.

pub mod artifact;
pub mod config;
pub mod conclusion;
pub mod participant;
pub mod round;
pub mod state;
pub mod timestamp;
pub mod transcript;
