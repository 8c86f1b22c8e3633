//! Similarity Index port
//!
//! Defines the interface for nearest-neighbor search over verse embeddings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use verse_rag_domain::VerseId;

/// Errors that can occur while querying the similarity index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    RequestFailed(String),

    #[error("Invalid index response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Ranked matches for a batch of query texts.
///
/// The outer vectors are indexed by query (one group per input text), the
/// inner vectors by rank, best match first. `documents[q][r]` is the text
/// of the verse identified by `ids[q][r]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexQueryResult {
    pub documents: Vec<Vec<String>>,
    pub ids: Vec<Vec<VerseId>>,
}

impl IndexQueryResult {
    pub fn new(documents: Vec<Vec<String>>, ids: Vec<Vec<VerseId>>) -> Self {
        Self { documents, ids }
    }

    /// Total number of identifiers across all groups.
    pub fn id_count(&self) -> usize {
        self.ids.iter().map(Vec::len).sum()
    }
}

/// Nearest-neighbor text search over the verse corpus.
///
/// Implementations (adapters) live in the infrastructure layer. The index is
/// built ahead of time; this port only reads it.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Find the `n_results` closest verses for each query text.
    async fn query(
        &self,
        query_texts: &[String],
        n_results: usize,
    ) -> Result<IndexQueryResult, IndexError>;
}
