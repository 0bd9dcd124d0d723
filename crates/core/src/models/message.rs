//! Message model for the shared message board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageId;

/// A message board entry. Append-only: never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Role label or the sending housekeeper's name
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author: String, text: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            author,
            text,
            timestamp,
        }
    }

    /// First character of the author, used as an avatar fallback
    pub fn author_initial(&self) -> Option<char> {
        self.author.chars().next()
    }

    /// Short clock time, e.g. "4:05 PM"
    pub fn format_timestamp(&self) -> String {
        self.timestamp.format("%-I:%M %p").to_string()
    }
}
