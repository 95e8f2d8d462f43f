//! Console output formatter for debate outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use debate_application::DebateOutcome;
use debate_domain::{ConsensusPoll, Participant};

/// Formats debate outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Every round followed by the conclusion
    pub fn format(outcome: &DebateOutcome) -> String {
        let config = &outcome.config;
        let mut output = String::new();

        output.push_str(&Self::header("AI Debate Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Topic:".cyan().bold(),
            config.topic().content()
        ));

        output.push_str(&format!("{}\n", "Participants:".cyan().bold()));
        for p in config.participants() {
            output.push_str(&format!("  {}\n", Self::participant_line(p)));
            output.push_str(&format!("     {}\n", p.position.dimmed()));
        }

        for round in outcome.transcript.rounds() {
            output.push_str(&Self::section_header(&round.label()));
            for utterance in outcome.transcript.in_round(round.index) {
                let title = config
                    .participant(utterance.speaker)
                    .map_or_else(|| utterance.speaker.to_string(), |p| format!("{} {}", p.marker(), p.title));
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", title).yellow().bold(),
                    utterance.content
                ));
            }
            if let Some(poll) = outcome.polls.iter().find(|p| p.round_index == round.index) {
                output.push_str(&format!("\n{}\n", Self::poll_line(outcome, poll)));
            }
        }

        output.push_str(&Self::section_header("Final Conclusion"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Synthesized by: {}", outcome.synthesizer).yellow().bold(),
            outcome.conclusion.synthesized_text
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DebateOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Only the synthesized conclusion
    pub fn format_conclusion_only(outcome: &DebateOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Debate Conclusion ===".cyan().bold()));
        output.push_str(&format!(
            "{} {}\n\n",
            "Topic:".bold(),
            outcome.config.topic().content()
        ));
        let consensus = if outcome.reached_consensus() {
            "consensus reached early"
        } else {
            "round limit reached"
        };
        output.push_str(&format!(
            "{}\n\n",
            format!("{} rounds, {}", outcome.rounds_run(), consensus).dimmed()
        ));
        output.push_str(&outcome.conclusion.synthesized_text);
        output.push('\n');

        output
    }

    fn participant_line(p: &Participant) -> String {
        format!(
            "{} {} ({}, {})",
            p.marker(),
            p.title.bold(),
            p.backend,
            p.stance.as_str()
        )
    }

    fn poll_line(outcome: &DebateOutcome, poll: &ConsensusPoll) -> String {
        let holdouts: Vec<_> = poll
            .holdouts()
            .filter_map(|id| outcome.config.participant(id))
            .map(|p| p.title.as_str())
            .collect();
        if holdouts.is_empty() {
            format!("{} {} everyone is ready", "Poll".green().bold(), poll.vote_summary())
        } else {
            format!(
                "{} {} not ready: {}",
                "Poll".yellow().bold(),
                poll.vote_summary(),
                holdouts.join(", ")
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &DebateOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &DebateOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_conclusion_only(&self, outcome: &DebateOutcome) -> String {
        Self::format_conclusion_only(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        ArtifactNames, BackendId, Conclusion, ConsensusVote, DebateConfig, OutputFormat,
        ParticipantId, Round, SessionTimestamp, Topic, TopicSlug, Transcript, Utterance,
    };

    fn outcome() -> DebateOutcome {
        let claude = BackendId::new("claude").unwrap();
        let config = DebateConfig::new(
            Topic::new("Four-day work week?").unwrap(),
            200,
            3,
            vec![
                Participant::new(ParticipantId::new(0), "Advocate", "I support it", claude.clone()),
                Participant::new(ParticipantId::new(1), "Skeptic", "I oppose it", claude.clone()),
            ],
        )
        .unwrap();
        let timestamp = SessionTimestamp::parse_file_stamp("20260301-101500").unwrap();
        let mut transcript = Transcript::new(timestamp);
        transcript.push(Utterance::new(Round::opening(), ParticipantId::new(1), "Too costly."));
        transcript.push(Utterance::new(Round::opening(), ParticipantId::new(0), "More rest."));
        transcript.push(Utterance::new(Round::debate(2), ParticipantId::new(1), "Still costly."));
        transcript.push(Utterance::new(Round::closing(3), ParticipantId::new(0), "Pilot it."));
        let proposals = Conclusion::proposals_from(&transcript);

        DebateOutcome {
            artifacts: ArtifactNames::new(TopicSlug::fallback(), timestamp),
            conclusion: Conclusion::new("Run a six-month pilot.", proposals),
            polls: vec![ConsensusPoll::new(
                2,
                vec![
                    ConsensusVote {
                        round_index: 2,
                        participant: ParticipantId::new(0),
                        ready: true,
                        raw: "YES".to_string(),
                    },
                    ConsensusVote {
                        round_index: 2,
                        participant: ParticipantId::new(1),
                        ready: false,
                        raw: "NO".to_string(),
                    },
                ],
            )],
            synthesizer: claude,
            config,
            transcript,
        }
    }

    #[test]
    fn test_full_format_lists_rounds_in_order() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&outcome());
        let opening = text.find("Round 1: Initial statements").unwrap();
        let debate = text.find("Round 2: Debate 1").unwrap();
        let closing = text.find("Round 3: Closing proposals").unwrap();
        assert!(opening < debate && debate < closing);
        assert!(text.find("Too costly.").unwrap() < text.find("More rest.").unwrap());
        assert!(text.contains("not ready: Skeptic"));
        assert!(text.contains("Synthesized by: claude"));
        assert!(text.contains("Run a six-month pilot."));
    }

    #[test]
    fn test_conclusion_only() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&outcome(), OutputFormat::Conclusion);
        assert!(text.contains("Four-day work week?"));
        assert!(text.contains("3 rounds, round limit reached"));
        assert!(text.ends_with("Run a six-month pilot.\n"));
        assert!(!text.contains("Too costly."));
    }

    #[test]
    fn test_json_format() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&outcome())).unwrap();
        assert_eq!(json["conclusion"]["synthesized_text"], "Run a six-month pilot.");
        assert_eq!(json["synthesizer"], "claude");
        assert_eq!(json["polls"][0]["votes"][1]["ready"], false);
    }
}
