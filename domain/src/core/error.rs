//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("max_history must be at least 1")]
    InvalidHistoryLimit,

    #[error("n_results must be at least 1")]
    InvalidResultCount,
}
