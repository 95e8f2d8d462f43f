//! String utilities for the domain layer.
//!
//! Lengths in this crate are measured in Unicode scalar values, not bytes,
//! so a character budget means the same thing for Korean and English text.

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Keep at most `max_chars` characters of `s`
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if char_len(s) <= max_chars {
        s.to_string()
    } else {
        format!("{}...", take_chars(s, max_chars.saturating_sub(3)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("hello"), 5);
        assert_eq!(char_len("토론"), 2);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("hello world", 5), "hello");
        assert_eq!(take_chars("찬성파입니다", 3), "찬성파");
        assert_eq!(take_chars("hi", 10), "hi");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("가나다라마바사", 5), "가나...");
    }
}
