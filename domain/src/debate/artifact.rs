//! Artifact naming: topic slug and the filenames derived from it

use crate::debate::timestamp::SessionTimestamp;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Longest slug accepted from a backend
pub const MAX_SLUG_LEN: usize = 50;
const FALLBACK_SLUG: &str = "debate";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[a-zA-Z]*\s*(.*?)\s*```").expect("valid code fence regex")
});

/// Filename-safe keyword for a topic (Value Object)
///
/// Always non-empty, at most [`MAX_SLUG_LEN`] characters, and made only of
/// `[a-z0-9-]` with no leading, trailing or doubled hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopicSlug(String);

impl TopicSlug {
    /// Clean up a backend's keyword answer.
    ///
    /// Returns `None` when nothing usable is left or the result is too long.
    pub fn sanitize(raw: &str) -> Option<Self> {
        let text = match CODE_FENCE.captures(raw) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            None => raw,
        };
        let text = text.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '`');
        let slug = slugify(text);
        if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Local slug of the topic itself, used when the backend's answer is unusable
    pub fn from_topic(topic: &str) -> Self {
        let slug = slugify(topic);
        let slug = truncate_at_hyphen(&slug, MAX_SLUG_LEN);
        if slug.is_empty() {
            Self::fallback()
        } else {
            Self(slug.to_string())
        }
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_SLUG.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if (c == '-' || c == '_' || c.is_whitespace()) && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn truncate_at_hyphen(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    let cut = &slug[..max];
    match cut.rfind('-') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.trim_end_matches('-'),
    }
}

/// Filenames of the two artifacts a session produces
///
/// Both names share the slug and the session timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactNames {
    pub slug: TopicSlug,
    pub timestamp: SessionTimestamp,
}

impl ArtifactNames {
    pub fn new(slug: TopicSlug, timestamp: SessionTimestamp) -> Self {
        Self { slug, timestamp }
    }

    /// `{slug}-{stamp}.md`
    pub fn transcript_file(&self) -> String {
        format!("{}-{}.md", self.slug, self.timestamp.file_stamp())
    }

    /// `{slug}-conclusion-{stamp}.md`
    pub fn conclusion_file(&self) -> String {
        format!("{}-conclusion-{}.md", self.slug, self.timestamp.file_stamp())
    }
}
