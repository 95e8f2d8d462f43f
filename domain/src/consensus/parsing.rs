//! Readiness answer classification.
//!
//! Strict on purpose: only the first word of the answer counts, after
//! stripping markdown emphasis and punctuation. Anything else is `None`,
//! which callers treat as "not ready".

const AFFIRMATIVE: &[&str] = &["YES", "Y", "READY", "예", "네"];
const NEGATIVE: &[&str] = &["NO", "N", "아니오", "아니요", "아니"];

/// Classify a readiness answer.
///
/// | Answer | Result |
/// |--------|--------|
/// | `YES`, `**Yes.**`, `예` | `Some(true)` |
/// | `NO`, `no - more to discuss`, `아니요` | `Some(false)` |
/// | `I think we are close` | `None` |
pub fn parse_readiness(response: &str) -> Option<bool> {
    let first = response
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_uppercase();

    if AFFIRMATIVE.contains(&first.as_str()) {
        Some(true)
    } else if NEGATIVE.contains(&first.as_str()) {
        Some(false)
    } else {
        None
    }
}
