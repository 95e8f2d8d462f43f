//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod consensus_poll;
pub mod normalize_length;
pub mod run_debate;
pub mod setup_debate;
pub mod synthesize_conclusion;

#[cfg(test)]
pub(crate) mod test_support;
