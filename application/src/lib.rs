//! Application layer for verse-rag
//!
//! This crate contains use cases, port definitions, and application
//! parameters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetrievalParams, SessionParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    similarity_index::{IndexError, IndexQueryResult, SimilarityIndex},
};
pub use use_cases::ask_question::{AskOutput, AskQuestionUseCase};
pub use use_cases::chat_session::{ChatSession, SessionReply};
pub use use_cases::retrieve_context::{ContextRetriever, RetrievalError};
