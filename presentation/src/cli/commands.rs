//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the debate result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round followed by the conclusion
    Full,
    /// Only the synthesized conclusion
    Conclusion,
    /// JSON output
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Conclusion => debate_domain::OutputFormat::Conclusion,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for ai-debate
#[derive(Parser, Debug)]
#[command(name = "ai-debate")]
#[command(author, version, about = "Structured debates between AI command-line backends")]
#[command(long_about = r#"
ai-debate lets several AI CLIs (Claude, Codex, Gemini, Grok, ...) argue a topic.

A debate has three stages:
1. Initial statements: every participant presents its position
2. Debate rounds: participants rebut each other; after each round from the
   second on, everyone is asked whether they are ready to agree
3. Closing: final proposals, then one backend writes the unified conclusion

The transcript and the conclusion are saved as Markdown files.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./debate.toml          Project-level config
3. ~/.config/ai-debate/config.toml   Global config

Example:
  ai-debate "Is remote work more productive than office work?"
  ai-debate --debate remote-work.toml --output conclusion
  ai-debate --refresh-backends --show-config
"#)]
pub struct Cli {
    /// Debate topic (asked interactively when omitted)
    pub topic: Option<String>,

    /// Debate definition file with topic and participants
    #[arg(short, long, value_name = "PATH")]
    pub debate: Option<PathBuf>,

    /// Number of participants for interactive setup
    #[arg(short, long, value_name = "N")]
    pub participants: Option<usize>,

    /// Target length of each statement, in characters
    #[arg(long, value_name = "CHARS")]
    pub char_limit: Option<usize>,

    /// Total rounds, including initial statements and closing proposals
    #[arg(short = 'r', long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// After a failed readiness poll, let holdouts speak first
    #[arg(long)]
    pub dissenters_first: bool,

    /// Directory for the transcript files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Re-check which backends are installed instead of using the cache
    #[arg(long)]
    pub refresh_backends: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostic logs to this file as well
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Record every turn, vote and the conclusion as JSON lines
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Plain line-by-line progress instead of spinners
    #[arg(long)]
    pub plain: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "ai-debate",
            "Is remote work better?",
            "-p",
            "3",
            "-r",
            "4",
            "--output",
            "conclusion",
            "-vv",
            "--dissenters-first",
        ])
        .unwrap();
        assert_eq!(cli.topic.as_deref(), Some("Is remote work better?"));
        assert_eq!(cli.participants, Some(3));
        assert_eq!(cli.max_rounds, Some(4));
        assert_eq!(cli.output, Some(OutputFormat::Conclusion));
        assert_eq!(cli.verbose, 2);
        assert!(cli.dissenters_first);
        assert!(cli.char_limit.is_none());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            debate_domain::OutputFormat::from(OutputFormat::Json),
            debate_domain::OutputFormat::Json
        );
    }
}
