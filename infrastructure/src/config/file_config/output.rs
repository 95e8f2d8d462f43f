//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

pub use debate_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Console format; the CLI flag wins when given
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let config: super::super::FileConfig = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<super::super::FileConfig, _> = toml::from_str("[output]\nformat = \"html\"\n");
        assert!(result.is_err());
    }
}
