//! Response dispatch: knowledge-base match or generative fallback.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::knowledge::KnowledgeBase;
use crate::model::{ModelAdapter, ModelError};

/// Fixed reply for empty or whitespace-only input.
pub const EMPTY_INPUT_PROMPT: &str = "Please type something for me to respond to!";

/// Decides between a knowledge-base reply and the generative fallback.
///
/// Owns the knowledge base and model handle read-only after construction.
/// The random source is injected so tests can seed a deterministic one.
pub struct ResponseDispatcher<R: Rng = StdRng> {
    knowledge: KnowledgeBase,
    model: ModelAdapter,
    rng: R,
}

impl ResponseDispatcher<StdRng> {
    /// Create a dispatcher with an entropy-seeded random source.
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, model: ModelAdapter) -> Self {
        Self::with_rng(knowledge, model, StdRng::from_entropy())
    }
}

impl<R: Rng> ResponseDispatcher<R> {
    /// Create a dispatcher with an explicit random source.
    #[must_use]
    pub fn with_rng(knowledge: KnowledgeBase, model: ModelAdapter, rng: R) -> Self {
        Self {
            knowledge,
            model,
            rng,
        }
    }

    /// The loaded knowledge base.
    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// The model handle.
    #[must_use]
    pub fn model(&self) -> &ModelAdapter {
        &self.model
    }

    /// Produce a reply for raw user input.
    ///
    /// Empty or whitespace-only input short-circuits to a fixed prompt
    /// message; no knowledge-base or model lookup happens. Otherwise the
    /// knowledge base is scanned first and the model is the fallback, with
    /// its output returned verbatim.
    ///
    /// # Errors
    ///
    /// Propagates `ModelError` when no intent matches and the adapter is
    /// unavailable or the generation request fails. No default reply is
    /// substituted.
    pub async fn respond(&mut self, user_input: &str) -> Result<String, ModelError> {
        if user_input.trim().is_empty() {
            return Ok(EMPTY_INPUT_PROMPT.to_string());
        }

        if let Some(reply) = self.knowledge.find_response(user_input, &mut self.rng) {
            tracing::debug!("Knowledge base matched");
            return Ok(reply.to_string());
        }

        tracing::debug!("No intent matched, delegating to model");
        self.model.generate(user_input).await
    }
}
