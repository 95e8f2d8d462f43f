//! Length budget for a single utterance
//!
//! The acceptable band for a response is `[char_limit / 4, char_limit]`,
//! measured in characters. Anything outside gets at most one correction
//! request; the correction itself is not checked again.

use crate::core::string::char_len;
use serde::{Deserialize, Serialize};

/// Divisor applied to the character limit to get the minimum length
pub const FLOOR_DIVISOR: usize = 4;

/// Minimum acceptable length for a given limit
pub fn length_floor(char_limit: usize) -> usize {
    char_limit / FLOOR_DIVISOR
}

/// Outcome of checking a text against its length budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum LengthVerdict {
    Acceptable { length: usize },
    TooShort { length: usize, floor: usize },
    TooLong { length: usize, limit: usize },
}

impl LengthVerdict {
    pub fn assess(text: &str, char_limit: usize) -> Self {
        let length = char_len(text);
        let floor = length_floor(char_limit);
        if length < floor {
            LengthVerdict::TooShort { length, floor }
        } else if length > char_limit {
            LengthVerdict::TooLong {
                length,
                limit: char_limit,
            }
        } else {
            LengthVerdict::Acceptable { length }
        }
    }

    pub fn length(&self) -> usize {
        match *self {
            LengthVerdict::Acceptable { length }
            | LengthVerdict::TooShort { length, .. }
            | LengthVerdict::TooLong { length, .. } => length,
        }
    }

    pub fn is_acceptable(&self) -> bool {
        matches!(self, LengthVerdict::Acceptable { .. })
    }
}
