//! Backend catalog: built-in CLIs plus user-defined entries

use debate_domain::BackendId;
use serde::{Deserialize, Serialize};

/// How to invoke one backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSpec {
    pub id: BackendId,
    pub display_name: String,
    /// Program and arguments; the prompt is written to stdin
    pub command: Vec<String>,
    /// Cheap command proving the program is installed
    pub probe: Vec<String>,
    /// Installation hint shown when nothing is available
    #[serde(default)]
    pub install_hint: Option<String>,
}

/// `(id, display name, command, install hint)` of the built-in backends
const BUILTIN: &[(&str, &str, &[&str], &str)] = &[
    (
        "claude",
        "Claude (Anthropic)",
        &["claude", "-p"],
        "npm install -g @anthropic-ai/claude-code",
    ),
    (
        "openai",
        "OpenAI GPT (Codex)",
        &["codex", "exec", "--skip-git-repo-check"],
        "npm install -g @openai/codex",
    ),
    (
        "gemini",
        "Gemini (Google)",
        &["gemini", "-p"],
        "npm install -g @google/gemini-cli",
    ),
    (
        "grok",
        "Grok (xAI)",
        &["grok", "-p"],
        "npm install -g @vibe-kit/grok-cli",
    ),
];

impl BackendSpec {
    fn builtin(id: &str, display_name: &str, command: &[&str], install_hint: &str) -> Option<Self> {
        let program = command.first()?;
        Some(Self {
            id: BackendId::new(id).ok()?,
            display_name: display_name.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
            probe: vec![program.to_string(), "--version".to_string()],
            install_hint: Some(install_hint.to_string()),
        })
    }

    /// Executable name, the first element of the command
    pub fn program(&self) -> Option<&str> {
        self.command.first().map(String::as_str)
    }

    /// Probe command, or `<program> --version` when none is configured
    pub fn probe_command(&self) -> Vec<String> {
        if !self.probe.is_empty() {
            return self.probe.clone();
        }
        self.program()
            .map(|p| vec![p.to_string(), "--version".to_string()])
            .unwrap_or_default()
    }
}

/// Ordered set of known backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCatalog {
    specs: Vec<BackendSpec>,
}

impl BackendCatalog {
    /// Claude, OpenAI (Codex), Gemini and Grok CLIs
    pub fn builtin() -> Self {
        Self {
            specs: BUILTIN
                .iter()
                .filter_map(|(id, name, command, hint)| BackendSpec::builtin(id, name, command, hint))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Add entries; an entry with a known id replaces the existing one
    pub fn with_custom(mut self, custom: impl IntoIterator<Item = BackendSpec>) -> Self {
        for spec in custom {
            match self.specs.iter_mut().find(|s| s.id == spec.id) {
                Some(existing) => *existing = spec,
                None => self.specs.push(spec),
            }
        }
        self
    }

    pub fn get(&self, id: &BackendId) -> Option<&BackendSpec> {
        self.specs.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &BackendId) -> bool {
        self.get(id).is_some()
    }

    pub fn specs(&self) -> &[BackendSpec] {
        &self.specs
    }

    /// Multi-line installation guide for every backend in the catalog
    pub fn installation_guide(&self) -> String {
        let mut guide = String::from("Install at least one of the following CLIs:\n");
        for (i, spec) in self.specs.iter().enumerate() {
            guide.push_str(&format!("\n{}. {}", i + 1, spec.display_name));
            if let Some(hint) = &spec.install_hint {
                guide.push_str(&format!("\n   {}", hint));
            }
        }
        guide.push_str("\n\nRun with --refresh-backends to re-check after installing.");
        guide
    }
}

impl Default for BackendCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
