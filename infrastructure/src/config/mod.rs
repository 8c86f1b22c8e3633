//! Configuration file loading for verse-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VERSE_RAG_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./verse-rag.toml` or `./.verse-rag.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/verse-rag/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCorpusConfig, FileIndexConfig, FileLlmConfig,
    FileLoggingConfig, FileOutputConfig, FileRetrievalConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
