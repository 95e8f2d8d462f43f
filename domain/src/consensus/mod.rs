//! Consensus domain
//!
//! Readiness votes collected after a debate round, and the classifier that
//! turns a backend's free-form answer into a vote.

pub mod parsing;
pub mod vote;

pub use parsing::parse_readiness;
pub use vote::{ConsensusPoll, ConsensusVote};
