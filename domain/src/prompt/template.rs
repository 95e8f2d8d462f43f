//! Prompt templates for the debate flow

use crate::debate::config::DebateConfig;
use crate::debate::participant::{Participant, ParticipantId};
use crate::debate::round::{Round, RoundKind};
use crate::debate::transcript::Transcript;
use std::collections::BTreeMap;

/// Templates for generating prompts at each stage of a debate
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Per-round instruction appended to a turn prompt
    pub fn round_instruction(round: Round, char_limit: usize) -> String {
        match round.kind {
            RoundKind::Opening => format!(
                "State your core argument concisely. (within {} characters)",
                char_limit
            ),
            RoundKind::Debate => format!(
                "Rebut or question the other participants' arguments, acknowledge valid points, \
and work toward common ground. Refer to other participants by their titles. (within {} characters)",
                char_limit
            ),
            RoundKind::Closing => format!(
                "Propose your final consensus proposal, concise and concrete. (within {} characters)",
                char_limit
            ),
        }
    }

    /// Prompt for one speaking turn
    pub fn turn_prompt(
        config: &DebateConfig,
        speaker: &Participant,
        transcript: &Transcript,
        round: Round,
    ) -> String {
        let others = config
            .participants()
            .iter()
            .filter(|p| p.id != speaker.id)
            .map(|p| format!("- {}: {}", p.title, p.position))
            .collect::<Vec<_>>()
            .join("\n");

        let mut prompt = format!(
            r#"You are "{title}".

Debate topic: {topic}

Your position: {position}

Other participants' positions:
{others}

Debate rules:
- Defend your position firmly.
- Actively rebut the other participants wherever there is room to do so.
- Point out logical errors, unsupported claims, contradictions, overstatement and hasty generalization.
- Give logical, concrete counterarguments backed by evidence.
- Avoid emotional or personal attacks, but argue forcefully on logic.
- Do not agree readily; examine every claim critically.
- Accept only valid criticism and never let a rebuttable point pass.
- Find the weaknesses in other arguments and offer alternatives or counterexamples.
- Refer to other participants by their titles, never by number or position in the list.

Current instruction: {instruction}"#,
            title = speaker.title,
            topic = config.topic(),
            position = speaker.position,
            others = others,
            instruction = Self::round_instruction(round, config.char_limit()),
        );

        if !transcript.is_empty() {
            prompt.push_str("\n\nDebate so far:\n\n");
            prompt.push_str(&Self::history(config, speaker.id, transcript));
        }

        prompt
    }

    /// Follow-up asking for a longer answer
    pub fn expand_prompt(original: &str, length: usize, floor: usize, char_limit: usize) -> String {
        format!(
            r#"The following answer is too short ({length} characters).

Original answer:
{original}

Please write it in more detail:
- Add concrete evidence and examples.
- Explain each point more clearly.
- Target: {floor}-{char_limit} characters.
- Do not exceed {char_limit} characters.

Output only the detailed answer, with no other commentary."#
        )
    }

    /// Follow-up asking for a shorter answer
    pub fn summarize_prompt(original: &str, length: usize, char_limit: usize) -> String {
        format!(
            r#"The following answer is too long ({length} characters).

Original answer:
{original}

Please condense it to at most {char_limit} characters while keeping every key argument.

Output only the condensed answer, with no other commentary."#
        )
    }

    /// Readiness question sent to each participant after a debate round
    pub fn consensus_prompt(
        config: &DebateConfig,
        participant: &Participant,
        transcript: &Transcript,
    ) -> String {
        format!(
            r#"You are "{title}".

Debate topic: {topic}
Your position: {position}

Debate so far:

{history}

Question: are you ready to work out a final consensus proposal now?

- YES: the debate has been thorough and you believe common ground can be found.
- NO: more discussion is needed, or there are still points you want to rebut.

IMPORTANT: answer with exactly one word, YES or NO. No explanation."#,
            title = participant.title,
            topic = config.topic(),
            position = participant.position,
            history = Self::history(config, participant.id, transcript),
        )
    }

    /// Synthesis of every closing proposal into one conclusion
    pub fn synthesis_prompt(
        config: &DebateConfig,
        proposals: &BTreeMap<ParticipantId, String>,
        char_limit: Option<usize>,
    ) -> String {
        let mut proposals_text = String::new();
        for (id, proposal) in proposals {
            let title = config
                .participant(*id)
                .map_or_else(|| id.to_string(), |p| p.title.clone());
            proposals_text.push_str(&format!("\n[Proposal from {}]\n{}\n", title, proposal));
        }

        let length_rule = match char_limit {
            Some(limit) => format!("\n6. Keep it within {} characters.", limit),
            None => String::new(),
        };

        format!(
            r#"Below are the final proposals made by {count} participants after debating "{topic}".
{proposals_text}
Your role:
Combine all of the proposals above into one integrated final conclusion.

Requirements:
1. Reflect every participant's core proposal in proportion.
2. State the common ground explicitly.
3. Keep the conclusion concrete and actionable.
4. Preserve each participant's named concerns and conditions.
5. Do not add content the proposals do not support.{length_rule}

Format: markdown with `##` section headers; use bullet or numbered lists where helpful.

Output only the integrated conclusion, with no other commentary."#,
            count = proposals.len(),
            topic = config.topic(),
        )
    }

    /// Short title representing a position
    pub fn title_prompt(topic: &str, position: &str) -> String {
        format!(
            r#"Read the debate topic and position below and produce a short title that represents the position.

Debate topic: {topic}
Position: {position}

Requirements:
- 2-5 words
- Capture the core of the position
- Examples: "Supporters", "Skeptics", "Pragmatists", "Cautious Reformers"

Answer with the title only."#
        )
    }

    /// Filename keyword for a topic
    pub fn slug_prompt(topic: &str) -> String {
        format!(
            r#"Convert the following topic into a short English keyword usable as a filename.

Topic: "{topic}"

Requirements:
- 3-5 English words
- lowercase only
- words joined by hyphens (-)
- no other special characters

Example:
Topic: "Is remote work or office work more productive?"
Answer: remote-vs-office-productivity

Answer with the keyword only."#
        )
    }

    /// Debate history as seen by `viewer`: their own turns are labelled "You"
    fn history(config: &DebateConfig, viewer: ParticipantId, transcript: &Transcript) -> String {
        let mut out = String::new();
        let mut current_round = None;
        for u in transcript.utterances() {
            if current_round != Some(u.round_index) {
                current_round = Some(u.round_index);
                out.push_str(&format!("## {}\n\n", u.round().label()));
            }
            let label = if u.speaker == viewer {
                "You".to_string()
            } else {
                config
                    .participant(u.speaker)
                    .map_or_else(|| u.speaker.to_string(), |p| p.title.clone())
            };
            out.push_str(&format!("{}: {}\n\n", label, u.content));
        }
        out.trim_end().to_string()
    }
}
