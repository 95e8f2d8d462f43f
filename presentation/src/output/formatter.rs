//! Output formatter trait

use debate_application::DebateOutcome;
use debate_domain::OutputFormat;

/// Trait for formatting debate outcomes
pub trait OutputFormatter {
    /// Every round followed by the conclusion
    fn format(&self, outcome: &DebateOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &DebateOutcome) -> String;

    /// Only the synthesized conclusion
    fn format_conclusion_only(&self, outcome: &DebateOutcome) -> String;

    /// Dispatch on the configured format
    fn render(&self, outcome: &DebateOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(outcome),
            OutputFormat::Conclusion => self.format_conclusion_only(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
