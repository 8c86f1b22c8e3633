//! Infrastructure layer for verse-rag
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, the verse table loader, and configuration file
//! loading.

pub mod config;
pub mod corpus;
pub mod index;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCorpusConfig, FileIndexConfig,
    FileLlmConfig, FileLoggingConfig, FileOutputConfig, FileRetrievalConfig, FileSessionConfig,
};
pub use corpus::{CorpusError, CsvVerseLoader};
pub use index::HttpSimilarityIndex;
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiCompatGateway;
