//! File events extracted from session logs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to a file, in Gource terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The file was read or written from scratch.
    Added,
    /// The file was edited in place.
    Modified,
}

impl Action {
    /// Single-letter code used in the Gource custom log format.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where an event came from: input source index and 1-based line number.
///
/// Only used to break timestamp ties; never written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub source: usize,
    pub line: usize,
}

/// A single file touch, normalized and ready to be ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// Root-relative (or untouched absolute) file path.
    pub path: String,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
    /// Gource "username" column.
    pub actor: String,
    pub position: Position,
}

impl FileEvent {
    /// Timestamp in whole Unix seconds, the resolution Gource works with.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Key that totally orders events across all sources.
    #[must_use]
    pub fn order_key(&self) -> (i64, Position) {
        (self.unix_seconds(), self.position)
    }
}
