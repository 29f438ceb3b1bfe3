use chrono::{DateTime, Utc};

use crate::level::Level;

/// A single accepted log event, handed to the active formatter.
///
/// Messages are only built by the [`Logger`](crate::Logger), once per admitted
/// call, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    value: String,
    sent_at: DateTime<Utc>,
    level: Level,
}

impl Message {
    pub(crate) fn new(value: String, sent_at: DateTime<Utc>, level: Level) -> Self {
        Self {
            value,
            sent_at,
            level,
        }
    }

    /// The joined text of the logged items.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the message was captured.
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    pub fn level(&self) -> Level {
        self.level
    }
}
