//! Output format value object

use serde::{Deserialize, Serialize};

/// How the finished debate is printed to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round followed by the conclusion (default)
    #[default]
    Full,
    /// Only the synthesized conclusion
    Conclusion,
    /// The whole outcome as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "conclusion" => Ok(OutputFormat::Conclusion),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
