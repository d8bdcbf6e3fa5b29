//! Knowledge base, interaction log and answer resolution.
//!
//! The knowledge base is a flat list of question/answer pairs scanned in full
//! on every question; the [`Resolver`] falls back to an LLM when nothing in
//! it matches.

pub mod resolver;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use resolver::{find_answer, AnswerSource, Resolution, Resolver};
pub use store::{InteractionLog, KnowledgeStore, SqliteStore};
pub use types::{KnowledgeEntry, LogEntry};
