//! Intent types and pattern matching.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A named group of trigger patterns and candidate responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Identifier for the intent (e.g. "greeting").
    pub tag: String,
    /// Substrings whose case-insensitive presence triggers this intent.
    pub patterns: Vec<String>,
    /// Candidate replies, one of which is chosen at random.
    pub responses: Vec<String>,
}

/// The intent knowledge base, immutable after load.
///
/// May be empty: a missing or malformed intents file degrades to an empty
/// base and every input falls through to the generative model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub intents: Vec<Intent>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base (degraded mode).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            intents: Vec::new(),
        }
    }

    /// Number of intents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// True when no intents are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Find a knowledge-base reply for the given input.
    ///
    /// Scans intents in sequence order and, within each intent, patterns in
    /// sequence order. The first pattern whose lowercase form is a substring
    /// of the lowercase input wins; one of the owning intent's responses is
    /// chosen uniformly at random. No scoring, no best-match selection.
    pub fn find_response<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Option<&str> {
        let input_lower = input.to_lowercase();
        for intent in &self.intents {
            for pattern in &intent.patterns {
                if input_lower.contains(&pattern.to_lowercase()) {
                    return intent.responses.choose(rng).map(String::as_str);
                }
            }
        }
        None
    }

    /// Check the per-intent invariants: at least one pattern and one response.
    pub(crate) fn validate(&self) -> Result<(), String> {
        for intent in &self.intents {
            if intent.patterns.is_empty() {
                return Err(format!("intent '{}' has no patterns", intent.tag));
            }
            if intent.responses.is_empty() {
                return Err(format!("intent '{}' has no responses", intent.tag));
            }
        }
        Ok(())
    }
}
