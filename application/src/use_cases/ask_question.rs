//! Ask Question use case.
//!
//! The user-facing entry point: one free-text question in, the assistant's
//! answer and the context bundle that produced it out.
//!
//! 1. Retrieve context with the configured [`RetrievalParams`]
//! 2. Hand the expanded windows to the [`ChatSession`]
//! 3. Return the reply together with the bundle for display
//!
//! A failing similarity index does not stop the turn: the question is asked
//! with empty context and the failure is reported on the output.

use crate::config::RetrievalParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::use_cases::chat_session::ChatSession;
use crate::use_cases::retrieve_context::ContextRetriever;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use verse_rag_domain::util::truncate_str;
use verse_rag_domain::{ContextBundle, Question};

/// Output of one asked question.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutput {
    /// The assistant's answer (or in-band error text).
    pub response: String,
    /// Everything retrieved for the question.
    pub bundle: ContextBundle,
    /// Why context was unavailable, when retrieval failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_unavailable: Option<String>,
}

/// Use case tying retrieval to a conversation turn.
#[derive(Clone)]
pub struct AskQuestionUseCase {
    retriever: ContextRetriever,
    params: RetrievalParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AskQuestionUseCase {
    pub fn new(retriever: ContextRetriever, params: RetrievalParams) -> Self {
        Self {
            retriever,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &RetrievalParams {
        &self.params
    }

    /// Answer `question` within `session`.
    pub async fn execute(&self, session: &mut ChatSession, question: &Question) -> AskOutput {
        info!("Asking: {}", truncate_str(question.content(), 100));

        let (bundle, context_unavailable) = match self
            .retriever
            .retrieve(question.content(), self.params.n_results, self.params.radius)
            .await
        {
            Ok(bundle) => (bundle, None),
            Err(e) => {
                warn!("Context unavailable, answering without it: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEvent::RETRIEVAL_FAILED,
                    serde_json::json!({ "error": e.to_string() }),
                ));
                (ContextBundle::default(), Some(e.to_string()))
            }
        };

        let reply = session
            .respond(question.content(), bundle.expanded_payload())
            .await;

        AskOutput {
            response: reply.response,
            bundle,
            context_unavailable,
        }
    }
}
