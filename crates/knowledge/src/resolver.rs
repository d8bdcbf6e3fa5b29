//! Answer resolution: knowledge base first, LLM second.

use crate::store::KnowledgeStore;
use crate::types::KnowledgeEntry;
use faq_llm::AnswerGenerator;
use std::sync::Arc;

/// Where a resolved answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    KnowledgeBase,
    Llm,
}

/// A resolved answer and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub answer: String,
    pub source: AnswerSource,
}

/// Find the first entry whose question contains `query`, ignoring case.
///
/// An empty query is contained in every question, so it selects the first
/// entry whenever the knowledge base is non-empty.
pub fn find_answer<'a>(entries: &'a [KnowledgeEntry], query: &str) -> Option<&'a KnowledgeEntry> {
    let normalized = query.to_lowercase();
    entries.iter().find(|entry| entry.matches(&normalized))
}

/// Chooses between a stored answer and a generated one.
///
/// The resolver has no side effects of its own; recording the interaction
/// is up to the caller.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn KnowledgeStore>,
    generator: AnswerGenerator,
}

impl Resolver {
    pub fn new(store: Arc<dyn KnowledgeStore>, generator: AnswerGenerator) -> Self {
        Self { store, generator }
    }

    /// Resolve `query` to an answer. Never fails.
    pub async fn resolve(&self, query: &str) -> String {
        self.resolve_with_source(query).await.answer
    }

    /// Like [`Resolver::resolve`], also reporting where the answer came from.
    pub async fn resolve_with_source(&self, query: &str) -> Resolution {
        let entries = self.load_knowledge_base();

        if let Some(entry) = find_answer(&entries, query) {
            tracing::debug!("Answered from knowledge base (question: {:?})", entry.question);
            return Resolution {
                answer: entry.answer.clone(),
                source: AnswerSource::KnowledgeBase,
            };
        }

        tracing::debug!("No knowledge base match, falling back to LLM");
        Resolution {
            answer: self.generator.generate(query).await,
            source: AnswerSource::Llm,
        }
    }

    /// Fetch the whole knowledge base, treating a failed fetch as empty.
    fn load_knowledge_base(&self) -> Vec<KnowledgeEntry> {
        match self.store.all_entries() {
            Ok(entries) => {
                if entries.is_empty() {
                    tracing::warn!("Knowledge base is empty");
                }
                entries
            }
            Err(e) => {
                tracing::warn!("Error loading knowledge base: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry::new("What do cats eat?", "Fish."),
            KnowledgeEntry::new("What is the refund policy?", "30 days."),
            KnowledgeEntry::new("Refund POLICY for gifts", "Store credit."),
        ]
    }

    #[test]
    fn test_find_answer_substring() {
        let entries = kb();
        assert_eq!(find_answer(&entries, "cat").unwrap().answer, "Fish.");
    }

    #[test]
    fn test_find_answer_case_insensitive_first_match() {
        let entries = kb();
        assert_eq!(find_answer(&entries, "REFUND policy").unwrap().answer, "30 days.");
    }

    #[test]
    fn test_find_answer_empty_query_selects_first() {
        let entries = kb();
        assert_eq!(find_answer(&entries, "").unwrap().answer, "Fish.");
    }

    #[test]
    fn test_find_answer_no_match() {
        let entries = kb();
        assert!(find_answer(&entries, "dogs").is_none());
        assert!(find_answer(&[], "").is_none());
    }

    #[test]
    fn test_query_longer_than_question_does_not_match() {
        let entries = vec![KnowledgeEntry::new("refund", "30 days.")];
        assert!(find_answer(&entries, "what is the refund policy").is_none());
    }
}
