//! LLM Gateway port
//!
//! Defines the interface for the stateless completion endpoint.

use async_trait::async_trait;
use thiserror::Error;
use verse_rag_domain::{Message, Model};

/// Errors that can occur during a completion request
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM completions
///
/// Each call is an independent request: the caller sends the full ordered
/// conversation and receives one text. Implementations (adapters) live in
/// the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete the conversation with the given model.
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError>;
}
