//! Retrieval parameters: similarity search width and window radius.

use serde::{Deserialize, Serialize};
use verse_rag_domain::DomainError;

/// Parameters of one context retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalParams {
    /// Number of ranked hits requested per query.
    pub n_results: usize,
    /// Neighbor window radius around each hit.
    pub radius: usize,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            n_results: 3,
            radius: 1,
        }
    }
}

impl RetrievalParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.n_results == 0 {
            return Err(DomainError::InvalidResultCount);
        }
        Ok(())
    }
}
