//! Session timestamp

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Single identifier minted once at session start (Value Object)
///
/// Every artifact of a session reads this value; nothing else in the
/// session calls the clock for naming purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionTimestamp(NaiveDateTime);

impl SessionTimestamp {
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Second precision keeps the file stamp and the display line in sync
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Parse a `YYYYMMDD-HHMMSS` stamp
    pub fn parse_file_stamp(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s, FILE_STAMP_FORMAT)
            .ok()
            .map(Self)
    }

    /// `YYYYMMDD-HHMMSS`, used in filenames
    pub fn file_stamp(&self) -> String {
        self.0.format(FILE_STAMP_FORMAT).to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS`, used in artifact headers
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl std::fmt::Display for SessionTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stamp())
    }
}

impl Serialize for SessionTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.file_stamp())
    }
}
