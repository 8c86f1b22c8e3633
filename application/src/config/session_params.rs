//! Session parameters: model identity and history budget.

use std::num::NonZeroUsize;
use verse_rag_domain::{DomainError, Model, PromptTemplate};

const DEFAULT_MAX_HISTORY: usize = 5;

/// Parameters fixed at session creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    /// Completion model the session talks to.
    pub model: Model,
    /// Number of exchanges (user + assistant turn) retained.
    pub max_history: NonZeroUsize,
    /// Initial system prompt. Empty means the session starts without a
    /// system slot and creates it on the first turn.
    pub system_prompt: String,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_history: NonZeroUsize::new(DEFAULT_MAX_HISTORY).unwrap_or(NonZeroUsize::MIN),
            system_prompt: PromptTemplate::initial_system().to_string(),
        }
    }
}

impl SessionParams {
    /// Set the exchange budget; zero is rejected.
    pub fn with_max_history(mut self, max_history: usize) -> Result<Self, DomainError> {
        self.max_history = NonZeroUsize::new(max_history).ok_or(DomainError::InvalidHistoryLimit)?;
        Ok(self)
    }
}
