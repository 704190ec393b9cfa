//! Knowledge base file loader.

use std::path::Path;

use super::KnowledgeBase;

/// Outcome of loading the intents file.
///
/// `Missing` and `Invalid` are non-fatal: the caller degrades to an empty
/// knowledge base and keeps running.
#[derive(Debug)]
pub enum KnowledgeLoad {
    /// File read, parsed and validated successfully.
    Loaded(KnowledgeBase),
    /// File does not exist.
    Missing,
    /// File exists but could not be read or parsed, or an intent violates
    /// the non-empty patterns/responses invariant.
    Invalid(String),
}

impl KnowledgeLoad {
    /// The loaded knowledge base, or an empty one in degraded mode.
    #[must_use]
    pub fn into_base(self) -> KnowledgeBase {
        match self {
            Self::Loaded(base) => base,
            Self::Missing | Self::Invalid(_) => KnowledgeBase::empty(),
        }
    }
}

/// Load the knowledge base from a JSON intents file.
///
/// Called exactly once at startup. Absence or malformation never fails the
/// process; both degrade to an empty knowledge base.
#[must_use]
pub fn load(path: &Path) -> KnowledgeLoad {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Knowledge base file not found");
        return KnowledgeLoad::Missing;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read knowledge base");
            return KnowledgeLoad::Invalid(e.to_string());
        }
    };

    let base: KnowledgeBase = match serde_json::from_str(&content) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse knowledge base");
            return KnowledgeLoad::Invalid(e.to_string());
        }
    };

    if let Err(reason) = base.validate() {
        tracing::warn!(path = %path.display(), %reason, "Knowledge base rejected");
        return KnowledgeLoad::Invalid(reason);
    }

    tracing::debug!(intents = base.len(), "Knowledge base loaded");
    KnowledgeLoad::Loaded(base)
}
