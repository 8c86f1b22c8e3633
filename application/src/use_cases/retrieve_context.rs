//! Retrieve Context use case.
//!
//! Queries the similarity index and expands every hit into a window of
//! neighboring verses from the [`VerseStore`].
//!
//! Identifier failures are isolated: an identifier that cannot be mapped to a
//! position is skipped and logged, and the rest of the retrieval continues.
//! Index failures are returned to the caller.

use crate::config::RetrievalParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::similarity_index::{IndexError, SimilarityIndex};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use verse_rag_domain::util::preview;
use verse_rag_domain::{ContextBundle, DomainError, VerseId, VerseIdError, VerseStore};

/// Errors that can occur during retrieval.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Similarity index error: {0}")]
    Index(#[from] IndexError),

    #[error(transparent)]
    InvalidParams(#[from] DomainError),
}

/// Expansion windows plus the identifiers that could not be expanded.
#[derive(Debug, Default)]
pub struct Expansion {
    pub groups: Vec<Vec<String>>,
    pub skipped: Vec<VerseIdError>,
}

/// Stateless context retriever.
///
/// Holds shared handles to the index and the store only; concurrent calls
/// need no coordination.
#[derive(Clone)]
pub struct ContextRetriever {
    index: Arc<dyn SimilarityIndex>,
    store: Arc<VerseStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ContextRetriever {
    pub fn new(index: Arc<dyn SimilarityIndex>, store: Arc<VerseStore>) -> Self {
        Self {
            index,
            store,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Retrieve context for a single query.
    pub async fn retrieve(
        &self,
        query: &str,
        n_results: usize,
        radius: usize,
    ) -> Result<ContextBundle, RetrievalError> {
        self.retrieve_many(&[query.to_string()], n_results, radius)
            .await
    }

    /// Retrieve context for several queries in one index call.
    ///
    /// `direct_hits` keeps one group per query; `expanded_groups` is flat,
    /// one window per identifier across all groups, in index order.
    pub async fn retrieve_many(
        &self,
        queries: &[String],
        n_results: usize,
        radius: usize,
    ) -> Result<ContextBundle, RetrievalError> {
        RetrievalParams { n_results, radius }.validate()?;

        debug!(
            queries = queries.len(),
            n_results, radius, "Querying similarity index"
        );

        let result = self.index.query(queries, n_results).await?;
        debug!(ids = result.id_count(), "Index returned matches");
        let expansion = self.expand(&result.ids, radius);

        for skipped in &expansion.skipped {
            warn!("Skipping verse: {}", skipped);
        }

        let bundle = ContextBundle::new(result.documents, expansion.groups);

        debug!(
            hits = bundle.hit_count(),
            windows = bundle.expanded_groups().len(),
            skipped = expansion.skipped.len(),
            "Retrieval complete"
        );

        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::RETRIEVAL,
            serde_json::json!({
                "query": queries.iter().map(|q| preview(q, 200)).collect::<Vec<_>>(),
                "n_results": n_results,
                "radius": radius,
                "hits": bundle.hit_count(),
                "windows": bundle.expanded_groups().len(),
                "skipped": expansion.skipped.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            }),
        ));

        Ok(bundle)
    }

    /// Map identifier groups to neighbor windows.
    ///
    /// Groups are walked in order and identifiers within a group in rank
    /// order; the resulting windows follow that order, not store order.
    pub fn expand(&self, id_groups: &[Vec<VerseId>], radius: usize) -> Expansion {
        let mut expansion = Expansion::default();

        for id in id_groups.iter().flatten() {
            match id.position() {
                Ok(position) => expansion.groups.push(self.store.window(position, radius)),
                Err(e) => expansion.skipped.push(e),
            }
        }

        expansion
    }
}
