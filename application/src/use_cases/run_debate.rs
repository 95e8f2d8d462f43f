//! Run Debate use case
//!
//! Drives a session through the debate state machine: opening statements,
//! rebuttal rounds with a consensus poll after each, closing proposals and
//! finally the synthesized conclusion. Turns are strictly sequential; every
//! turn sees the full transcript produced before it.

use crate::config::DebateParams;
use crate::ports::conversation_logger::{ConversationLogger, DebateEvent, NoConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::transcript_sink::{
    NoTranscript, TranscriptError, TranscriptEvent, TranscriptSink,
};
use crate::use_cases::consensus_poll::ConsensusPoller;
use crate::use_cases::normalize_length::LengthNormalizer;
use crate::use_cases::synthesize_conclusion::{ConclusionSynthesizer, synthesizer_backend};
use debate_domain::{
    ArtifactNames, BackendId, Conclusion, ConsensusPoll, DebateConfig, DebatePromptTemplate,
    DebateState, Participant, Round, SessionTimestamp, TopicSlug, Transcript, Utterance,
    dissenters_first, speaking_order,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a debate session
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Round {round}: turn of {participant} ({backend}) failed: {source}")]
    TurnFailed {
        round: u32,
        participant: String,
        backend: BackendId,
        #[source]
        source: GatewayError,
    },

    #[error("Synthesis with {backend} failed: {source}")]
    SynthesisFailed {
        backend: BackendId,
        #[source]
        source: GatewayError,
    },

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

impl RunDebateError {
    /// Backend involved in the failure, if any
    pub fn backend(&self) -> Option<&BackendId> {
        match self {
            RunDebateError::TurnFailed { backend, .. }
            | RunDebateError::SynthesisFailed { backend, .. } => Some(backend),
            RunDebateError::Transcript(_) => None,
        }
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub config: DebateConfig,
    pub slug: TopicSlug,
    pub params: DebateParams,
    /// Minted at session start when not given
    pub session_timestamp: Option<SessionTimestamp>,
}

impl RunDebateInput {
    pub fn new(config: DebateConfig, slug: TopicSlug) -> Self {
        Self {
            config,
            slug,
            params: DebateParams::default(),
            session_timestamp: None,
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_session_timestamp(mut self, timestamp: SessionTimestamp) -> Self {
        self.session_timestamp = Some(timestamp);
        self
    }
}

/// Everything a finished session produced
#[derive(Debug, Clone, Serialize)]
pub struct DebateOutcome {
    pub config: DebateConfig,
    pub artifacts: ArtifactNames,
    pub transcript: Transcript,
    pub conclusion: Conclusion,
    pub polls: Vec<ConsensusPoll>,
    pub synthesizer: BackendId,
}

impl DebateOutcome {
    /// Number of rounds run, opening and closing included
    pub fn rounds_run(&self) -> usize {
        self.transcript.rounds().len()
    }

    /// Whether a unanimous poll ended the debate early
    pub fn reached_consensus(&self) -> bool {
        self.polls.iter().any(ConsensusPoll::all_ready)
    }
}

/// Use case for running a debate session
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    normalizer: LengthNormalizer<G>,
    poller: ConsensusPoller<G>,
    synthesizer: ConclusionSynthesizer<G>,
    sink: Arc<dyn TranscriptSink>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            normalizer: LengthNormalizer::new(Arc::clone(&gateway)),
            poller: ConsensusPoller::new(Arc::clone(&gateway)),
            synthesizer: ConclusionSynthesizer::new(Arc::clone(&gateway)),
            gateway,
            sink: Arc::new(NoTranscript),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_transcript_sink(mut self, sink: Arc<dyn TranscriptSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateOutcome, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateOutcome, RunDebateError> {
        let RunDebateInput {
            config,
            slug,
            params,
            session_timestamp,
        } = input;

        let timestamp = session_timestamp.unwrap_or_else(SessionTimestamp::now);
        let artifacts = ArtifactNames::new(slug, timestamp);
        let mut transcript = Transcript::new(timestamp);

        info!(
            "Starting debate on {:?} with {} participants, up to {} rounds",
            config.topic().content(),
            config.participants().len(),
            config.max_rounds()
        );
        self.sink.record(&TranscriptEvent::SessionStarted {
            config: &config,
            artifacts: &artifacts,
        })?;
        self.conversation_logger.log(&DebateEvent::SessionStart {
            topic: config.topic().content().to_string(),
            session: timestamp.file_stamp(),
            char_limit: config.char_limit(),
            max_rounds: config.max_rounds(),
            participants: config.participants().to_vec(),
        });

        let mut order = speaking_order(config.participants());
        let mut polls = Vec::new();
        let mut state = DebateState::Opening;

        while let Some(round) = state.round() {
            self.run_round(&config, &params, round, &order, &mut transcript, progress)
                .await?;

            let all_ready = if state.polls_after_round() {
                let poll = self
                    .poller
                    .poll(round.index, &config, &transcript, progress)
                    .await;
                self.log_poll(&poll);
                let all_ready = poll.all_ready();
                if !all_ready && params.dissenters_first {
                    order = dissenters_first(&order, &poll);
                    debug!("Holdouts speak first in the next round");
                }
                polls.push(poll);
                Some(all_ready)
            } else {
                None
            };

            state = state.advance(config.max_rounds(), all_ready);
        }

        let conclusion = self
            .synthesize(&config, &params, &transcript, progress)
            .await?;
        self.sink.record(&TranscriptEvent::ConclusionReached {
            config: &config,
            artifacts: &artifacts,
            transcript: &transcript,
            conclusion: &conclusion,
        })?;
        state = state.advance(config.max_rounds(), None);
        debug_assert!(state.is_done());

        info!(
            "Debate finished after {} rounds ({} utterances)",
            transcript.rounds().len(),
            transcript.len()
        );

        Ok(DebateOutcome {
            synthesizer: synthesizer_backend(&config, &params).clone(),
            config,
            artifacts,
            transcript,
            conclusion,
            polls,
        })
    }

    /// One pass of turns, one per participant, in `order`
    async fn run_round(
        &self,
        config: &DebateConfig,
        params: &DebateParams,
        round: Round,
        order: &[&Participant],
        transcript: &mut Transcript,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunDebateError> {
        info!("{}", round.label());
        progress.on_round_start(&round, order);
        self.sink.record(&TranscriptEvent::RoundStarted { round })?;

        for &speaker in order {
            if !transcript.is_empty() && !params.turn_delay.is_zero() {
                tokio::time::sleep(params.turn_delay).await;
            }
            let utterance = self
                .take_turn(config, round, speaker, transcript, progress)
                .await?;
            self.sink.record(&TranscriptEvent::UtteranceRecorded {
                speaker,
                utterance: &utterance,
            })?;
            progress.on_turn_complete(speaker, &utterance);
            transcript.push(utterance);
        }

        Ok(())
    }

    async fn take_turn(
        &self,
        config: &DebateConfig,
        round: Round,
        speaker: &Participant,
        transcript: &Transcript,
        progress: &dyn ProgressNotifier,
    ) -> Result<Utterance, RunDebateError> {
        let turn_failed = |source| RunDebateError::TurnFailed {
            round: round.index,
            participant: speaker.title.clone(),
            backend: speaker.backend.clone(),
            source,
        };

        debug!("{} ({}) speaking", speaker.title, speaker.backend);
        progress.on_turn_start(&round, speaker);

        let prompt = DebatePromptTemplate::turn_prompt(config, speaker, transcript, round);
        let raw = self
            .gateway
            .generate(&speaker.backend, &prompt)
            .await
            .map_err(turn_failed)?;
        let normalized = self
            .normalizer
            .normalize(&speaker.backend, raw, config.char_limit())
            .await
            .map_err(turn_failed)?;

        if let Some(correction) = normalized.correction {
            info!(
                "{}: response {:?} from {} to {} chars",
                speaker.title, correction.kind, correction.before, correction.after
            );
            progress.on_length_corrected(
                speaker,
                correction.kind,
                correction.before,
                correction.after,
            );
            self.conversation_logger.log(&DebateEvent::LengthCorrection {
                round: round.index,
                participant: speaker.id,
                backend: speaker.backend.clone(),
                correction: correction.kind,
                before: correction.before,
                after: correction.after,
            });
        }

        let utterance = Utterance::new(round, speaker.id, normalized.text);
        self.conversation_logger.log(&DebateEvent::Turn {
            round: round.index,
            kind: round.kind,
            participant: speaker.id,
            title: speaker.title.clone(),
            backend: speaker.backend.clone(),
            length: utterance.length,
            content: utterance.content.clone(),
        });
        Ok(utterance)
    }

    async fn synthesize(
        &self,
        config: &DebateConfig,
        params: &DebateParams,
        transcript: &Transcript,
        progress: &dyn ProgressNotifier,
    ) -> Result<Conclusion, RunDebateError> {
        let backend = synthesizer_backend(config, params);
        progress.on_synthesis_start(backend.as_str());

        let proposals = Conclusion::proposals_from(transcript);
        let synthesis = self
            .synthesizer
            .synthesize(config, &proposals, params)
            .await
            .map_err(|source| RunDebateError::SynthesisFailed {
                backend: backend.clone(),
                source,
            })?;
        progress.on_synthesis_complete();

        self.conversation_logger.log(&DebateEvent::Conclusion {
            backend: synthesis.backend,
            correction: synthesis.correction.map(|c| c.kind),
            content: synthesis.text.clone(),
        });
        Ok(Conclusion::new(synthesis.text, proposals))
    }

    fn log_poll(&self, poll: &ConsensusPoll) {
        for vote in &poll.votes {
            self.conversation_logger.log(&DebateEvent::Vote {
                round: vote.round_index,
                participant: vote.participant,
                ready: vote.ready,
                answer: vote.raw.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        PromptKind, RecordingLogger, RecordingSink, ScriptedGateway, config,
    };
    use debate_domain::{RoundKind, StanceCategory};
    use std::time::Duration;

    fn input(config: DebateConfig) -> RunDebateInput {
        RunDebateInput::new(config, TopicSlug::sanitize("remote-work").unwrap())
            .with_params(DebateParams::default().with_turn_delay(Duration::ZERO))
            .with_session_timestamp(SessionTimestamp::parse_file_stamp("20250102-030405").unwrap())
    }

    fn two(max_rounds: u32) -> DebateConfig {
        config(
            max_rounds,
            &[("Pro", "I support remote work", "claude"), ("Con", "I oppose remote work", "gemini")],
        )
    }

    fn kinds(outcome: &DebateOutcome) -> Vec<RoundKind> {
        outcome.transcript.rounds().iter().map(|r| r.kind).collect()
    }

    #[tokio::test]
    async fn test_early_consensus_skips_remaining_debate_rounds() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "YES"));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case.execute(input(two(3))).await.unwrap();

        // OPENING(2) + DEBATE(2) + CLOSING(2)
        assert_eq!(outcome.transcript.len(), 6);
        assert_eq!(
            kinds(&outcome),
            vec![RoundKind::Opening, RoundKind::Debate, RoundKind::Closing]
        );
        assert_eq!(gateway.count(PromptKind::Consensus), 2);
        assert!(outcome.reached_consensus());
    }

    #[tokio::test]
    async fn test_consensus_ends_debate_before_max_rounds() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "YES"));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case.execute(input(two(6))).await.unwrap();

        assert_eq!(outcome.transcript.debate_rounds_run(), 1);
        assert_eq!(outcome.transcript.len(), 6);
        assert_eq!(outcome.rounds_run(), 3);
    }

    #[tokio::test]
    async fn test_two_rounds_never_debate_or_poll() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "YES"));
        let use_case = RunDebateUseCase::new(gateway.clone());
        let three = config(
            2,
            &[
                ("A", "support", "claude"),
                ("B", "oppose", "gemini"),
                ("C", "unsure", "grok"),
            ],
        );

        let outcome = use_case.execute(input(three)).await.unwrap();

        assert_eq!(outcome.transcript.len(), 6);
        assert_eq!(kinds(&outcome), vec![RoundKind::Opening, RoundKind::Closing]);
        assert_eq!(gateway.count(PromptKind::Consensus), 0);
        assert!(outcome.polls.is_empty());
    }

    #[tokio::test]
    async fn test_negative_votes_run_to_max_rounds() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, prompt| {
            Ok(match PromptKind::of(prompt) {
                // one holdout is enough to keep debating
                PromptKind::Consensus if backend.as_str() == "gemini" => "NO".to_string(),
                PromptKind::Consensus => "YES".to_string(),
                _ => "z".repeat(200),
            })
        }));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case.execute(input(two(5))).await.unwrap();

        // N * (2 + debate_rounds), debate_rounds = R - 2
        assert_eq!(outcome.transcript.len(), 2 * (2 + 3));
        assert_eq!(outcome.transcript.debate_rounds_run(), 3);
        assert_eq!(outcome.polls.len(), 3);
        assert!(!outcome.reached_consensus());
        assert_eq!(outcome.transcript.utterances().last().unwrap().round_index, 5);
    }

    #[tokio::test]
    async fn test_every_round_has_one_utterance_per_participant() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "NO"));
        let use_case = RunDebateUseCase::new(gateway);
        let five = config(
            4,
            &[
                ("D1", "oppose", "claude"),
                ("A1", "support", "claude"),
                ("N1", "hybrid", "claude"),
                ("D2", "reject", "claude"),
                ("A2", "agree", "claude"),
            ],
        );

        let outcome = use_case.execute(input(five)).await.unwrap();

        for round in outcome.transcript.rounds() {
            let titles: Vec<_> = outcome
                .transcript
                .in_round(round.index)
                .map(|u| outcome.config.participant(u.speaker).unwrap().title.as_str())
                .collect();
            assert_eq!(titles, vec!["D1", "D2", "A1", "A2", "N1"]);
        }
        assert_eq!(outcome.transcript.len(), 5 * 4);
    }

    #[tokio::test]
    async fn test_dissenters_first_reorders_next_round() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, prompt| {
            Ok(match PromptKind::of(prompt) {
                PromptKind::Consensus if backend.as_str() == "grok" => "NO".to_string(),
                PromptKind::Consensus => "YES".to_string(),
                _ => "w".repeat(200),
            })
        }));
        let use_case = RunDebateUseCase::new(gateway);
        let cfg = config(
            4,
            &[
                ("Con", "oppose", "claude"),
                ("Pro", "support", "gemini"),
                ("Pro2", "agree", "grok"),
            ],
        );
        let mut run = input(cfg);
        run.params = run.params.with_dissenters_first(true);

        let outcome = use_case.execute(run).await.unwrap();

        let round3: Vec<_> = outcome
            .transcript
            .in_round(3)
            .map(|u| u.speaker.index())
            .collect();
        assert_eq!(round3, vec![2, 0, 1]);
        let round2: Vec<_> = outcome
            .transcript
            .in_round(2)
            .map(|u| u.speaker.index())
            .collect();
        assert_eq!(round2, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_length_correction_once_per_turn() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, prompt| {
            Ok(match (PromptKind::of(prompt), backend.as_str()) {
                (PromptKind::Consensus, _) => "NO".to_string(),
                (PromptKind::Synthesis, _) => "done".to_string(),
                (PromptKind::Expand, _) => "still short".to_string(),
                (PromptKind::Summarize, _) => "s".repeat(350),
                (_, "claude") => "short".to_string(),
                _ => "l".repeat(900),
            })
        }));
        let use_case = RunDebateUseCase::new(gateway.clone());

        let outcome = use_case.execute(input(two(2))).await.unwrap();

        // 2 rounds, claude expands each turn, gemini summarizes each turn
        assert_eq!(gateway.count(PromptKind::Expand), 2);
        assert_eq!(gateway.count(PromptKind::Summarize), 2);
        let lengths: Vec<_> = outcome.transcript.utterances().iter().map(|u| u.length).collect();
        // Con (gemini, dissenter) speaks first
        assert_eq!(lengths, vec![350, 11, 350, 11]);
    }

    #[tokio::test]
    async fn test_timeout_aborts_with_backend_and_round() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, prompt| {
            if backend.as_str() == "claude" && prompt.contains("Debate so far") {
                return Err(GatewayError::Timeout {
                    backend: "claude".to_string(),
                    seconds: 300,
                });
            }
            Ok("v".repeat(200))
        }));
        let sink = Arc::new(RecordingSink::default());
        let use_case = RunDebateUseCase::new(gateway).with_transcript_sink(sink.clone());

        let err = use_case.execute(input(two(3))).await.unwrap_err();

        match &err {
            RunDebateError::TurnFailed {
                round,
                participant,
                backend,
                source,
            } => {
                // Con speaks first, so Pro's opening already sees history
                assert_eq!(*round, 1);
                assert_eq!(participant, "Pro");
                assert_eq!(backend.as_str(), "claude");
                assert!(source.is_timeout());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.backend().unwrap().as_str(), "claude");
        // no conclusion artifact after a fatal failure
        assert!(!sink.events().iter().any(|e| e.starts_with("conclusion")));
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_fatal() {
        let gateway = Arc::new(ScriptedGateway::new(|_, prompt| match PromptKind::of(prompt) {
            PromptKind::Synthesis => Err(GatewayError::EmptyResponse("claude".to_string())),
            _ => Ok("q".repeat(200)),
        }));
        let use_case = RunDebateUseCase::new(gateway);
        let err = use_case.execute(input(two(2))).await.unwrap_err();
        assert!(matches!(err, RunDebateError::SynthesisFailed { .. }));
    }

    #[tokio::test]
    async fn test_artifacts_share_session_timestamp() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "YES"));
        let sink = Arc::new(RecordingSink::default());
        let use_case = RunDebateUseCase::new(gateway).with_transcript_sink(sink.clone());

        let outcome = use_case.execute(input(two(3))).await.unwrap();

        let events = sink.events();
        assert_eq!(events.first().unwrap(), "session:remote-work-20250102-030405.md");
        assert_eq!(
            events.last().unwrap(),
            "conclusion:remote-work-conclusion-20250102-030405.md"
        );
        assert_eq!(
            outcome.transcript.session_timestamp(),
            &outcome.artifacts.timestamp
        );
        assert_eq!(events.iter().filter(|e| e.starts_with("round:")).count(), 3);
        assert_eq!(events.iter().filter(|e| e.starts_with("utterance:")).count(), 6);
    }

    #[tokio::test]
    async fn test_conclusion_holds_every_closing_proposal() {
        let gateway = Arc::new(ScriptedGateway::new(|backend, prompt| {
            Ok(match PromptKind::of(prompt) {
                PromptKind::Synthesis => "Integrated".to_string(),
                PromptKind::Turn if prompt.contains("final consensus proposal") => {
                    format!("{} proposal {}", backend, "p".repeat(150))
                }
                _ => "t".repeat(200),
            })
        }));
        let logger = Arc::new(RecordingLogger::default());
        let use_case =
            RunDebateUseCase::new(gateway.clone()).with_conversation_logger(logger.clone());

        let outcome = use_case.execute(input(two(2))).await.unwrap();

        assert_eq!(outcome.conclusion.synthesized_text, "Integrated");
        assert_eq!(outcome.conclusion.proposals.len(), 2);
        assert!(outcome.conclusion.proposals.values().all(|p| p.contains("proposal")));
        assert_eq!(outcome.synthesizer.as_str(), "claude");

        let synthesis_prompt = gateway
            .calls()
            .into_iter()
            .find(|(_, p)| PromptKind::of(p) == PromptKind::Synthesis)
            .unwrap()
            .1;
        assert!(synthesis_prompt.contains("[Proposal from Pro]"));
        assert!(synthesis_prompt.contains("[Proposal from Con]"));

        let events = logger.events.lock().unwrap().clone();
        assert_eq!(events.first(), Some(&"session_start"));
        assert_eq!(events.iter().filter(|e| **e == "turn").count(), 4);
        assert_eq!(events.last(), Some(&"conclusion"));
    }

    #[tokio::test]
    async fn test_stances_in_config_drive_order() {
        let gateway = Arc::new(ScriptedGateway::debating(200, "YES"));
        let use_case = RunDebateUseCase::new(gateway);
        let outcome = use_case.execute(input(two(2))).await.unwrap();
        let first = outcome.transcript.utterances()[0].speaker;
        assert_eq!(
            outcome.config.participant(first).unwrap().stance,
            StanceCategory::Disagree
        );
    }
}
