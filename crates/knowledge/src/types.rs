//! Knowledge base and interaction log record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question/answer pair in the knowledge base.
///
/// Non-emptiness is enforced when entries are uploaded, not when they are
/// read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Build an entry from raw upload fields.
    ///
    /// Both fields are trimmed; `None` if either is empty afterwards.
    pub fn from_upload(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self::new(question, answer))
    }

    /// Case-insensitive containment test against an already-lowercased query.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.question.to_lowercase().contains(normalized_query)
    }
}

/// One resolved `ask` interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The raw query as received
    pub question: String,

    /// The answer that was returned
    pub answer: String,

    /// When the entry was written
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,
}
