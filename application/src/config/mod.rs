//! Application configuration

mod debate_params;

pub use debate_params::DebateParams;
