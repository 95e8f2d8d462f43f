//! JSONL writer for debate events.
//!
//! Every line is the serialized event (tagged with `type`) plus `seq` and
//! `timestamp`.
//! Several sessions may share one file: lines are appended, and `seq`
//! restarts at 1 for each logger.

use debate_application::{ConversationLogger, DebateEvent};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct LogState {
    writer: BufWriter<File>,
    seq: u64,
}

/// Append-only JSONL event log
pub struct JsonlEventLog {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &DebateEvent, seq: u64) -> serde_json::Result<Value> {
        let mut map = match serde_json::to_value(event)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("type".to_string(), Value::from(event.kind()));
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("seq".to_string(), Value::from(seq));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, false)),
        );
        Ok(Value::Object(map))
    }
}

impl ConversationLogger for JsonlEventLog {
    fn log(&self, event: &DebateEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.seq += 1;
        let written = Self::record(event, state.seq)
            .and_then(|record| serde_json::to_string(&record))
            .map_err(io::Error::from)
            .and_then(|line| writeln!(state.writer, "{}", line))
            .and_then(|()| state.writer.flush());
        if let Err(e) = written {
            warn!("Failed to write event log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_application::CorrectionKind;
    use debate_domain::{BackendId, ParticipantId, RoundKind};

    fn lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn session_start() -> DebateEvent {
        DebateEvent::SessionStart {
            topic: "Remote work".to_string(),
            session: "20250102-030405".to_string(),
            char_limit: 300,
            max_rounds: 3,
            participants: Vec::new(),
        }
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("debate.jsonl");
        let log = JsonlEventLog::open(&path).unwrap();

        log.log(&DebateEvent::Turn {
            round: 1,
            kind: RoundKind::Opening,
            participant: ParticipantId::new(0),
            title: "Remote Advocate".to_string(),
            backend: BackendId::new("claude").unwrap(),
            length: 42,
            content: "Offices are optional.".to_string(),
        });
        log.log(&DebateEvent::LengthCorrection {
            round: 2,
            participant: ParticipantId::new(1),
            backend: BackendId::new("gemini").unwrap(),
            correction: CorrectionKind::Summarized,
            before: 900,
            after: 280,
        });
        log.log(&DebateEvent::Vote {
            round: 2,
            participant: ParticipantId::new(1),
            ready: false,
            answer: "NO".to_string(),
        });
        drop(log);

        let records = lines(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "turn");
        assert_eq!(records[0]["seq"], 1);
        assert_eq!(records[0]["title"], "Remote Advocate");
        assert_eq!(records[0]["backend"], "claude");
        assert_eq!(records[1]["type"], "length_correction");
        assert_eq!(records[1]["correction"], "summarized");
        assert_eq!(records[1]["before"], 900);
        assert_eq!(records[2]["type"], "vote");
        assert_eq!(records[2]["seq"], 3);
        assert_eq!(records[2]["ready"], false);
        assert!(records.iter().all(|r| r.get("timestamp").is_some()));
    }

    #[test]
    fn test_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.jsonl");
        for _ in 0..2 {
            let log = JsonlEventLog::open(&path).unwrap();
            log.log(&session_start());
        }

        let records = lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["type"], "session_start");
        assert_eq!(records[1]["seq"], 1);
        assert_eq!(records[1]["session"], "20250102-030405");
    }

    #[test]
    fn test_open_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlEventLog::open(dir.path()).is_err());
    }
}
