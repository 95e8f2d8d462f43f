//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::{CorrectionKind, ProgressNotifier};
use debate_domain::{ConsensusPoll, ConsensusVote, Participant, Round, Utterance};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per pending request
pub struct ProgressReporter {
    multi: MultiProgress,
    active: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            active: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut active) = self.active.lock()
            && let Some(previous) = active.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn finish_spinner(&self, message: String) {
        if let Ok(mut active) = self.active.lock()
            && let Some(pb) = active.take()
        {
            pb.finish_with_message(message);
        }
    }

    fn line(&self, text: String) {
        let _ = self.multi.println(text);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: &Round, order: &[&Participant]) {
        self.line(format!("\n{}", round_header(round)));
        self.line(format!("  {} {}", "order:".dimmed(), speaking_order(order)));
    }

    fn on_turn_start(&self, _round: &Round, speaker: &Participant) {
        self.start_spinner(format!("{} {} is speaking...", speaker.marker(), speaker.title.bold()));
    }

    fn on_turn_complete(&self, speaker: &Participant, utterance: &Utterance) {
        self.finish_spinner(format!(
            "{} {} {}",
            "v".green(),
            speaker.title,
            format!("({} chars)", utterance.length).dimmed()
        ));
    }

    fn on_length_corrected(&self, speaker: &Participant, kind: CorrectionKind, before: usize, after: usize) {
        self.line(format!("  {}", correction_line(speaker, kind, before, after)));
    }

    fn on_poll_start(&self, round_index: u32) {
        self.start_spinner(format!("Asking whether everyone is ready to agree (after round {})", round_index));
    }

    fn on_vote(&self, participant: &Participant, vote: &ConsensusVote) {
        if let Ok(active) = self.active.lock()
            && let Some(pb) = active.as_ref()
        {
            pb.set_message(format!("{} {}", participant.title, vote_mark(vote)));
        }
    }

    fn on_poll_complete(&self, poll: &ConsensusPoll) {
        self.finish_spinner(poll_line(poll));
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        self.start_spinner(format!("Writing the final conclusion with {}", synthesizer.bold()));
    }

    fn on_synthesis_complete(&self) {
        self.finish_spinner(format!("{} Conclusion ready", "v".green()));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: &Round, order: &[&Participant]) {
        println!("\n{} {}", "->".cyan(), round_header(round));
        println!("   {} {}", "order:".dimmed(), speaking_order(order));
    }

    fn on_turn_complete(&self, speaker: &Participant, utterance: &Utterance) {
        println!("  {} {} ({} chars)", "v".green(), speaker.title, utterance.length);
    }

    fn on_length_corrected(&self, speaker: &Participant, kind: CorrectionKind, before: usize, after: usize) {
        println!("  {}", correction_line(speaker, kind, before, after));
    }

    fn on_vote(&self, participant: &Participant, vote: &ConsensusVote) {
        println!("    {} {}", vote_mark(vote), participant.title);
    }

    fn on_poll_complete(&self, poll: &ConsensusPoll) {
        println!("  {}", poll_line(poll));
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        println!("\n{} Writing the final conclusion with {}", "->".cyan(), synthesizer);
    }
}

fn round_header(round: &Round) -> String {
    round.label().bold().to_string()
}

fn speaking_order(order: &[&Participant]) -> String {
    order
        .iter()
        .map(|p| format!("{} {}", p.marker(), p.title))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn correction_line(speaker: &Participant, kind: CorrectionKind, before: usize, after: usize) -> String {
    let action = match kind {
        CorrectionKind::Expanded => "expanded",
        CorrectionKind::Summarized => "summarized",
    };
    format!(
        "{} {} {} ({} -> {} chars)",
        "~".yellow(),
        speaker.title,
        action,
        before,
        after
    )
}

fn vote_mark(vote: &ConsensusVote) -> String {
    if vote.ready {
        "ready".green().to_string()
    } else {
        "not ready".yellow().to_string()
    }
}

fn poll_line(poll: &ConsensusPoll) -> String {
    let summary = format!(
        "{} {}/{} ready",
        poll.vote_summary(),
        poll.ready_count(),
        poll.votes.len()
    );
    if poll.all_ready() {
        format!("{} Consensus reached {}", "v".green(), summary)
    } else {
        format!("{} No consensus yet {}", "o".yellow(), summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{BackendId, ParticipantId};

    fn participant(i: usize, title: &str) -> Participant {
        Participant::new(ParticipantId::new(i), title, "position", BackendId::new("claude").unwrap())
    }

    fn vote(i: usize, ready: bool) -> ConsensusVote {
        ConsensusVote {
            round_index: 2,
            participant: ParticipantId::new(i),
            ready,
            raw: if ready { "YES" } else { "NO" }.to_string(),
        }
    }

    #[test]
    fn test_poll_line() {
        colored::control::set_override(false);
        let poll = ConsensusPoll {
            round_index: 2,
            votes: vec![vote(0, true), vote(1, false)],
        };
        assert_eq!(poll_line(&poll), "o No consensus yet [●○] 1/2 ready");
    }

    #[test]
    fn test_speaking_order_and_correction_line() {
        colored::control::set_override(false);
        let a = participant(0, "Skeptic");
        let b = participant(1, "Advocate");
        let order = speaking_order(&[&b, &a]);
        assert!(order.contains("Advocate -> "));
        assert!(order.ends_with("Skeptic"));
        assert_eq!(
            correction_line(&a, CorrectionKind::Summarized, 900, 480),
            "~ Skeptic summarized (900 -> 480 chars)"
        );
    }
}
