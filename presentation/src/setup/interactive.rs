//! Prompts for topic, limits and participants
//!
//! Parsing is split from I/O: the `parse_*` functions turn one answer into
//! a value plus an optional notice, and [`InteractiveSetup`] only loops over
//! a reader and a writer.

use colored::Colorize;
use debate_application::{ParticipantDraft, SetupDebateInput};
use debate_domain::{BackendId, MAX_PARTICIPANTS, MIN_PARTICIPANTS, MIN_ROUNDS};
use std::io::{self, BufRead, Write};

/// Values offered when the user just presses Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupDefaults {
    pub char_limit: usize,
    pub max_rounds: u32,
    pub participants: usize,
}

/// A backend the user may pick, with its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendChoice {
    pub id: BackendId,
    pub display_name: String,
}

/// Empty keeps the default; out-of-range values are clamped or replaced.
pub fn parse_participant_count(input: &str, default: usize) -> (usize, Option<String>) {
    let input = input.trim();
    if input.is_empty() {
        return (default, None);
    }
    match input.parse::<usize>() {
        Ok(n) if n < MIN_PARTICIPANTS => (
            default,
            Some(format!(
                "At least {} participants are needed, using {}",
                MIN_PARTICIPANTS, default
            )),
        ),
        Ok(n) if n > MAX_PARTICIPANTS => (
            MAX_PARTICIPANTS,
            Some(format!(
                "At most {} participants are allowed, using {}",
                MAX_PARTICIPANTS, MAX_PARTICIPANTS
            )),
        ),
        Ok(n) => (n, None),
        Err(_) => (default, Some(format!("Not a number, using {}", default))),
    }
}

pub fn parse_char_limit(input: &str, default: usize) -> (usize, Option<String>) {
    let input = input.trim();
    if input.is_empty() {
        return (default, None);
    }
    match input.parse::<usize>() {
        Ok(0) | Err(_) => (
            default,
            Some(format!("Enter a positive number, using {}", default)),
        ),
        Ok(n) => (n, None),
    }
}

pub fn parse_round_count(input: &str, default: u32) -> (u32, Option<String>) {
    let input = input.trim();
    if input.is_empty() {
        return (default, None);
    }
    match input.parse::<u32>() {
        Ok(n) if n < MIN_ROUNDS => (
            MIN_ROUNDS,
            Some(format!("At least {} rounds are needed, using {}", MIN_ROUNDS, MIN_ROUNDS)),
        ),
        Ok(n) => (n, None),
        Err(_) => (default, Some(format!("Not a number, using {}", default))),
    }
}

/// 1-based menu number or backend id; empty picks the first entry.
pub fn parse_backend_choice(input: &str, choices: &[BackendChoice]) -> Result<usize, String> {
    let input = input.trim();
    if input.is_empty() && !choices.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = input.parse::<usize>() {
        return if (1..=choices.len()).contains(&n) {
            Ok(n - 1)
        } else {
            Err(format!("Enter a number from 1 to {}", choices.len()))
        };
    }
    let wanted = input.to_lowercase();
    choices
        .iter()
        .position(|c| c.id.as_str() == wanted)
        .ok_or_else(|| format!("Unknown backend '{}'", input))
}

/// Line-oriented setup dialogue
pub struct InteractiveSetup<R, W> {
    reader: R,
    writer: W,
}

impl InteractiveSetup<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveSetup<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Ask for everything not already given.
    ///
    /// `topic` and `participants` skip their questions when `Some`;
    /// `ask_limits` controls whether char limit and rounds are asked at all.
    pub fn collect(
        &mut self,
        topic: Option<String>,
        participants: Option<usize>,
        defaults: SetupDefaults,
        ask_limits: bool,
        backends: &[BackendChoice],
    ) -> io::Result<SetupDebateInput> {
        let topic = match topic.filter(|t| !t.trim().is_empty()) {
            Some(topic) => topic,
            None => self.ask_non_empty("Debate topic: ", "Please enter a topic.")?,
        };

        let count = match participants {
            Some(n) => n,
            None => {
                let answer = self.ask(&format!(
                    "Number of participants [default: {}, min: {}, max: {}]: ",
                    defaults.participants, MIN_PARTICIPANTS, MAX_PARTICIPANTS
                ))?;
                self.with_notice(parse_participant_count(&answer, defaults.participants))?
            }
        };

        let (char_limit, max_rounds) = if ask_limits {
            let answer = self.ask(&format!(
                "Character limit per statement [default: {}]: ",
                defaults.char_limit
            ))?;
            let char_limit = self.with_notice(parse_char_limit(&answer, defaults.char_limit))?;
            let answer = self.ask(&format!(
                "Maximum rounds [default: {}]: ",
                defaults.max_rounds
            ))?;
            let max_rounds = self.with_notice(parse_round_count(&answer, defaults.max_rounds))?;
            (char_limit, max_rounds)
        } else {
            (defaults.char_limit, defaults.max_rounds)
        };

        writeln!(
            self.writer,
            "\nEnter each participant's position and pick a backend.\nTitles are generated automatically.\n"
        )?;
        let mut drafts = Vec::with_capacity(count);
        for i in 0..count {
            writeln!(self.writer, "{}", "=".repeat(60))?;
            writeln!(self.writer, "Participant {}/{}", i + 1, count)?;
            writeln!(self.writer, "{}", "=".repeat(60))?;
            let position = self.ask_non_empty(
                "Position or role: ",
                "Please enter a position or role.",
            )?;
            let backend = self.ask_backend(backends)?;
            drafts.push(ParticipantDraft::new(position, backend));
        }

        Ok(SetupDebateInput {
            topic,
            char_limit,
            max_rounds,
            participants: drafts,
            synthesizer: None,
        })
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed during setup",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask_non_empty(&mut self, prompt: &str, retry: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.writer, "{} {}", "!".yellow(), retry)?;
        }
    }

    fn ask_backend(&mut self, backends: &[BackendChoice]) -> io::Result<BackendId> {
        if backends.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no backend to choose from",
            ));
        }
        for (i, choice) in backends.iter().enumerate() {
            writeln!(self.writer, "  {}. {}", i + 1, choice.display_name)?;
        }
        loop {
            let answer = self.ask(&format!("Backend (1-{}) [default: 1]: ", backends.len()))?;
            match parse_backend_choice(&answer, backends) {
                Ok(index) => {
                    let choice = &backends[index];
                    writeln!(self.writer, "{} {}\n", "✓".green(), choice.display_name)?;
                    return Ok(choice.id.clone());
                }
                Err(message) => writeln!(self.writer, "{} {}", "x".red(), message)?,
            }
        }
    }

    fn with_notice<T>(&mut self, (value, notice): (T, Option<String>)) -> io::Result<T> {
        if let Some(notice) = notice {
            writeln!(self.writer, "{} {}", "!".yellow(), notice)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn choices() -> Vec<BackendChoice> {
        ["claude", "gemini"]
            .into_iter()
            .map(|id| BackendChoice {
                id: BackendId::new(id).unwrap(),
                display_name: id.to_uppercase(),
            })
            .collect()
    }

    const DEFAULTS: SetupDefaults = SetupDefaults {
        char_limit: 500,
        max_rounds: 5,
        participants: 2,
    };

    #[test]
    fn test_parse_participant_count() {
        assert_eq!(parse_participant_count("", 2), (2, None));
        assert_eq!(parse_participant_count(" 4 ", 2), (4, None));
        assert_eq!(parse_participant_count("1", 3).0, 3);
        assert_eq!(parse_participant_count("25", 2).0, MAX_PARTICIPANTS);
        assert!(parse_participant_count("many", 2).1.is_some());
    }

    #[test]
    fn test_parse_char_limit_and_rounds() {
        assert_eq!(parse_char_limit("", 500), (500, None));
        assert_eq!(parse_char_limit("300", 500), (300, None));
        assert_eq!(parse_char_limit("0", 500).0, 500);
        assert_eq!(parse_round_count("1", 5).0, MIN_ROUNDS);
        assert_eq!(parse_round_count("7", 5), (7, None));
        assert_eq!(parse_round_count("x", 5).0, 5);
    }

    #[test]
    fn test_parse_backend_choice() {
        let choices = choices();
        assert_eq!(parse_backend_choice("", &choices), Ok(0));
        assert_eq!(parse_backend_choice("2", &choices), Ok(1));
        assert_eq!(parse_backend_choice("Gemini", &choices), Ok(1));
        assert!(parse_backend_choice("3", &choices).is_err());
        assert!(parse_backend_choice("grok", &choices).is_err());
    }

    #[test]
    fn test_collect_full_dialogue() {
        let input = "\nRemote work?\n3\n400\n1\n\nI support remote work\n2\nOffices are better\n9\n1\n  \nNo preference\n\n";
        let mut output = Vec::new();
        let result = InteractiveSetup::new(Cursor::new(input), &mut output)
            .collect(None, None, DEFAULTS, true, &choices())
            .unwrap();

        assert_eq!(result.topic, "Remote work?");
        assert_eq!(result.char_limit, 400);
        assert_eq!(result.max_rounds, MIN_ROUNDS);
        let backends: Vec<_> = result.participants.iter().map(|p| p.backend.as_str()).collect();
        assert_eq!(backends, vec!["gemini", "claude", "claude"]);
        assert_eq!(result.participants[2].position, "No preference");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Please enter a topic."));
        assert!(shown.contains("Enter a number from 1 to 2"));
        assert!(shown.contains("Participant 3/3"));
    }

    #[test]
    fn test_given_values_skip_questions() {
        let input = "A\n1\nB\n2\n";
        let result = InteractiveSetup::new(Cursor::new(input), Vec::new())
            .collect(Some("Topic".to_string()), Some(2), DEFAULTS, false, &choices())
            .unwrap();
        assert_eq!(result.topic, "Topic");
        assert_eq!(result.char_limit, 500);
        assert_eq!(result.max_rounds, 5);
        assert_eq!(result.participants.len(), 2);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let err = InteractiveSetup::new(Cursor::new("Topic\n"), Vec::new())
            .collect(None, None, DEFAULTS, false, &choices())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
