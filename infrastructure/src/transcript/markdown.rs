//! Markdown artifacts: the growing transcript and the conclusion file.

use debate_application::{AvailabilityRegistry, TranscriptError, TranscriptEvent, TranscriptSink};
use debate_domain::{
    ArtifactNames, BackendId, Conclusion, DebateConfig, Participant, Round, Utterance,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

const SEPARATOR: &str = "---\n\n";

#[derive(Debug, Default)]
struct WriterState {
    transcript: Option<PathBuf>,
    written: Vec<PathBuf>,
}

/// Writes `{slug}-{stamp}.md` and `{slug}-conclusion-{stamp}.md`
pub struct MarkdownTranscriptWriter {
    output_dir: PathBuf,
    display_names: BTreeMap<BackendId, String>,
    state: Mutex<WriterState>,
}

impl MarkdownTranscriptWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            display_names: BTreeMap::new(),
            state: Mutex::new(WriterState::default()),
        }
    }

    /// Use the registry's display names for backends
    pub fn with_display_names(mut self, registry: &dyn AvailabilityRegistry) -> Self {
        self.display_names = registry
            .available_backends()
            .into_iter()
            .map(|id| {
                let name = registry.display_name(&id);
                (id, name)
            })
            .collect();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn display_name(&self, backend: &BackendId) -> String {
        self.display_names
            .get(backend)
            .cloned()
            .unwrap_or_else(|| backend.to_string())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, WriterState>, TranscriptError> {
        self.state
            .lock()
            .map_err(|_| TranscriptError::OutOfOrder("writer state poisoned".to_string()))
    }

    fn current(&self) -> Result<PathBuf, TranscriptError> {
        self.lock()?.transcript.clone().ok_or_else(|| {
            TranscriptError::OutOfOrder("event recorded before the session started".to_string())
        })
    }

    fn start(&self, config: &DebateConfig, artifacts: &ArtifactNames) -> Result<(), TranscriptError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| TranscriptError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_dir.join(artifacts.transcript_file());

        let mut doc = String::new();
        let _ = writeln!(doc, "# AI Debate Transcript\n");
        self.write_header(&mut doc, config, artifacts);
        doc.push_str("## Debate\n\n");
        write_file(&path, &doc, false)?;

        info!("Writing transcript to {}", path.display());
        let mut state = self.lock()?;
        state.transcript = Some(path.clone());
        state.written.push(path);
        Ok(())
    }

    fn round(&self, round: Round) -> Result<(), TranscriptError> {
        let path = self.current()?;
        write_file(&path, &format!("### {}\n\n", round.label()), true)
    }

    fn utterance(&self, speaker: &Participant, utterance: &Utterance) -> Result<(), TranscriptError> {
        let path = self.current()?;
        debug!("Appending {} turn to {}", speaker.title, path.display());
        let entry = format!(
            "#### {} {} ({})\n\n{}\n\n",
            speaker.marker(),
            speaker.title,
            self.display_name(&speaker.backend),
            utterance.content
        );
        write_file(&path, &entry, true)
    }

    fn conclusion(
        &self,
        config: &DebateConfig,
        artifacts: &ArtifactNames,
        conclusion: &Conclusion,
    ) -> Result<(), TranscriptError> {
        self.current()?;
        let path = self.output_dir.join(artifacts.conclusion_file());

        let mut doc = String::new();
        let _ = writeln!(doc, "# Debate Conclusion\n");
        self.write_header(&mut doc, config, artifacts);
        doc.push_str("## Final Conclusion\n\n");
        let _ = writeln!(doc, "{}\n", conclusion.synthesized_text);
        doc.push_str(SEPARATOR);
        doc.push_str("## Individual Proposals (reference)\n\n");
        for (id, proposal) in &conclusion.proposals {
            if let Some(p) = config.participant(*id) {
                let _ = writeln!(
                    doc,
                    "### {} Proposal from {} ({})\n",
                    p.marker(),
                    p.title,
                    self.display_name(&p.backend)
                );
                let _ = writeln!(doc, "{}\n", proposal);
            }
        }
        write_file(&path, &doc, false)?;

        info!("Conclusion saved to {}", path.display());
        self.lock()?.written.push(path);
        Ok(())
    }

    /// Creation line, topic and roster shared by both artifacts
    fn write_header(&self, doc: &mut String, config: &DebateConfig, artifacts: &ArtifactNames) {
        let _ = writeln!(doc, "**Created**: {}\n", artifacts.timestamp.display());
        let _ = writeln!(doc, "**Participants**: {}\n", config.participants().len());
        doc.push_str(SEPARATOR);
        doc.push_str("## Topic\n\n");
        let _ = writeln!(doc, "{}\n", config.topic().content());
        doc.push_str(SEPARATOR);
        doc.push_str("## Participants\n\n");
        for p in config.participants() {
            let _ = writeln!(
                doc,
                "### {} Participant {}: {} ({})\n",
                p.marker(),
                p.id.index() + 1,
                p.title,
                self.display_name(&p.backend)
            );
            let _ = writeln!(doc, "> {}\n", p.position);
        }
        doc.push_str(SEPARATOR);
    }
}

fn write_file(path: &Path, text: &str, append: bool) -> Result<(), TranscriptError> {
    let io_err = |source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(io_err)?;
    file.write_all(text.as_bytes()).map_err(io_err)
}

impl TranscriptSink for MarkdownTranscriptWriter {
    fn record(&self, event: &TranscriptEvent<'_>) -> Result<(), TranscriptError> {
        match event {
            TranscriptEvent::SessionStarted { config, artifacts } => self.start(config, artifacts),
            TranscriptEvent::RoundStarted { round } => self.round(*round),
            TranscriptEvent::UtteranceRecorded { speaker, utterance } => {
                self.utterance(speaker, utterance)
            }
            TranscriptEvent::ConclusionReached {
                config,
                artifacts,
                conclusion,
                ..
            } => self.conclusion(config, artifacts, conclusion),
        }
    }

    fn written_files(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .map(|s| s.written.clone())
            .unwrap_or_default()
    }
}
