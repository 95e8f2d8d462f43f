//! Consensus poll
//!
//! Asks every participant, one after another, whether they are ready to
//! move to closing proposals.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use debate_domain::core::string::truncate;
use debate_domain::debate::state::MIN_POLL_ROUND;
use debate_domain::{
    ConsensusPoll, ConsensusVote, DebateConfig, DebatePromptTemplate, Transcript, parse_readiness,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ConsensusPoller<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> ConsensusPoller<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Poll every participant in registration order.
    ///
    /// Never fails: an error or an answer that is not a clear YES/NO counts
    /// as "not ready". Before [`MIN_POLL_ROUND`] no one is asked and the
    /// returned poll is empty (and therefore not unanimous).
    pub async fn poll(
        &self,
        round_index: u32,
        config: &DebateConfig,
        transcript: &Transcript,
        progress: &dyn ProgressNotifier,
    ) -> ConsensusPoll {
        if round_index < MIN_POLL_ROUND {
            debug!("Skipping consensus poll before round {}", MIN_POLL_ROUND);
            return ConsensusPoll::new(round_index, Vec::new());
        }

        progress.on_poll_start(round_index);
        let mut votes = Vec::with_capacity(config.participants().len());

        for participant in config.participants() {
            let prompt = DebatePromptTemplate::consensus_prompt(config, participant, transcript);
            let vote = match self.gateway.generate(&participant.backend, &prompt).await {
                Ok(answer) => match parse_readiness(&answer) {
                    Some(ready) => ConsensusVote::new(round_index, participant.id, ready, answer),
                    None => {
                        warn!(
                            "Unclear readiness answer from {}, counting as not ready: {:?}",
                            participant.title,
                            truncate(&answer, 80)
                        );
                        ConsensusVote::new(round_index, participant.id, false, answer)
                    }
                },
                Err(e) => {
                    warn!(
                        "Readiness check failed for {} ({}): {}",
                        participant.title, participant.backend, e
                    );
                    ConsensusVote::new(round_index, participant.id, false, e.to_string())
                }
            };
            progress.on_vote(participant, &vote);
            votes.push(vote);
        }

        let poll = ConsensusPoll::new(round_index, votes);
        info!(
            "Consensus poll after round {}: {}/{} ready {}",
            round_index,
            poll.ready_count(),
            poll.votes.len(),
            poll.vote_summary()
        );
        progress.on_poll_complete(&poll);
        poll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{PromptKind, ScriptedGateway, config};
    use debate_domain::SessionTimestamp;

    fn three() -> DebateConfig {
        config(
            4,
            &[
                ("Pro", "support it", "claude"),
                ("Con", "oppose it", "gemini"),
                ("Mid", "it depends", "grok"),
            ],
        )
    }

    #[tokio::test]
    async fn test_unanimous_yes() {
        let gateway = Arc::new(ScriptedGateway::debating(10, "YES"));
        let poller = ConsensusPoller::new(gateway.clone());
        let poll = poller
            .poll(2, &three(), &Transcript::new(SessionTimestamp::now()), &NoProgress)
            .await;
        assert!(poll.all_ready());
        assert_eq!(poll.votes.len(), 3);
        assert_eq!(gateway.count(PromptKind::Consensus), 3);
    }

    #[tokio::test]
    async fn test_not_invoked_before_round_two() {
        let gateway = Arc::new(ScriptedGateway::debating(10, "YES"));
        let poller = ConsensusPoller::new(gateway.clone());
        let poll = poller
            .poll(1, &three(), &Transcript::new(SessionTimestamp::now()), &NoProgress)
            .await;
        assert!(!poll.all_ready());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_error_and_unclear_answers_count_as_not_ready() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, _| match backend.as_str() {
            "claude" => Ok("YES".to_string()),
            "gemini" => Err(GatewayError::Timeout {
                backend: "gemini".to_string(),
                seconds: 300,
            }),
            _ => Ok("Perhaps after one more round".to_string()),
        }));
        let poller = ConsensusPoller::new(gateway);
        let poll = poller
            .poll(3, &three(), &Transcript::new(SessionTimestamp::now()), &NoProgress)
            .await;

        assert!(!poll.all_ready());
        let ready: Vec<_> = poll.votes.iter().map(|v| v.ready).collect();
        assert_eq!(ready, vec![true, false, false]);
        assert!(poll.votes[1].raw.contains("timed out"));
    }

    #[tokio::test]
    async fn test_polls_in_registration_order() {
        let gateway = Arc::new(ScriptedGateway::debating(10, "NO"));
        let poller = ConsensusPoller::new(gateway.clone());
        poller
            .poll(2, &three(), &Transcript::new(SessionTimestamp::now()), &NoProgress)
            .await;
        let backends: Vec<_> = gateway
            .calls()
            .into_iter()
            .map(|(b, _)| b.to_string())
            .collect();
        assert_eq!(backends, vec!["claude", "gemini", "grok"]);
    }
}
