//! Presentation layer for ai-debate
//!
//! This crate contains the CLI definition, the interactive setup dialogue,
//! progress reporters and output formatters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod setup;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use setup::{BackendChoice, InteractiveSetup, SetupDefaults};
