//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use verse_rag_application::{RetrievalParams, SessionParams};
use verse_rag_domain::{DomainError, Model, OutputFormat, PromptTemplate};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("Invalid parameter: {0}")]
    Params(#[from] DomainError),

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("corpus.text_column cannot be empty")]
    EmptyTextColumn,

    #[error("{0} cannot be empty")]
    EmptyEndpoint(&'static str),
}

/// Verse table location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Path to the CSV file holding one verse per row
    pub path: PathBuf,
    /// Header of the column with the verse text
    pub text_column: String,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Quran.csv"),
            text_column: "Ayat".to_string(),
        }
    }
}

/// Similarity index service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIndexConfig {
    /// Base URL of the index service
    pub endpoint: String,
    /// Collection holding the verse embeddings
    pub collection: String,
    /// Timeout in seconds for one query
    pub timeout_seconds: u64,
}

impl Default for FileIndexConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            collection: "quran_separate_verses_v3".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl FileIndexConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Completion endpoint (OpenAI-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: Model,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Timeout in seconds for one completion
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: Model::default(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileLlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Retrieval width
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Ranked hits requested per question
    pub n_results: usize,
    /// Neighbor window radius around each hit
    pub radius: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        let params = RetrievalParams::default();
        Self {
            n_results: params.n_results,
            radius: params.radius,
        }
    }
}

/// Conversation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Exchanges kept in the conversation
    pub max_history: usize,
    /// System prompt a new session starts with (empty = none)
    pub system_prompt: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            max_history: 5,
            system_prompt: PromptTemplate::initial_system().to_string(),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while waiting
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

/// Log destinations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of retrievals and completions
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs
    pub dir: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Transcript path, treating an empty string as disabled
    pub fn conversation_log_path(&self) -> Option<&PathBuf> {
        self.conversation_log
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Diagnostic log directory, treating an empty string as disabled
    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.dir.as_ref().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Complete TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub corpus: FileCorpusConfig,
    pub index: FileIndexConfig,
    pub llm: FileLlmConfig,
    pub retrieval: FileRetrievalConfig,
    pub session: FileSessionConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.index.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("index"));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("llm"));
        }
        self.retrieval_params().validate()?;
        self.session_params()?;
        if self.llm.model.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.corpus.text_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTextColumn);
        }
        if self.index.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint("index.endpoint"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint("llm.base_url"));
        }
        Ok(())
    }

    pub fn retrieval_params(&self) -> RetrievalParams {
        RetrievalParams {
            n_results: self.retrieval.n_results,
            radius: self.retrieval.radius,
        }
    }

    pub fn session_params(&self) -> Result<SessionParams, ConfigValidationError> {
        let params = SessionParams {
            model: self.llm.model.clone(),
            system_prompt: self.session.system_prompt.clone(),
            ..SessionParams::default()
        }
        .with_max_history(self.session.max_history)?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[corpus]
path = "data/verses.csv"
text_column = "text"

[index]
endpoint = "http://index:9000"
collection = "verses"
timeout_seconds = 5

[llm]
base_url = "http://localhost:11434/v1"
model = "llama3-8b-8192"
api_key_env = "LOCAL_KEY"
timeout_seconds = 120

[retrieval]
n_results = 5
radius = 2

[session]
max_history = 3
system_prompt = ""

[output]
format = "json"
color = false

[logging]
conversation_log = "logs/chat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus.path, PathBuf::from("data/verses.csv"));
        assert_eq!(config.corpus.text_column, "text");
        assert_eq!(config.index.collection, "verses");
        assert_eq!(config.index.timeout(), Duration::from_secs(5));
        assert_eq!(config.llm.model, Model::Llama3_8b);
        assert_eq!(config.llm.api_key_env, "LOCAL_KEY");
        assert_eq!(config.retrieval.n_results, 5);
        assert_eq!(config.retrieval.radius, 2);
        assert_eq!(config.session.max_history, 3);
        assert!(config.session.system_prompt.is_empty());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("logs/chat.jsonl"))
        );
        assert!(config.logging.dir.is_none());
        assert!(config.logging.log_dir().is_none());
    }

    #[test]
    fn test_empty_logging_paths_are_disabled() {
        let toml_str = r#"
[logging]
conversation_log = ""
dir = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.logging.conversation_log.is_some());
        assert!(config.logging.conversation_log_path().is_none());
        assert!(config.logging.log_dir().is_none());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[retrieval]
n_results = 10
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.n_results, 10);
        // Defaults should apply
        assert_eq!(config.retrieval.radius, 1);
        assert_eq!(config.corpus.text_column, "Ayat");
        assert_eq!(config.llm.model, Model::Llama3_70b);
        assert_eq!(config.session.max_history, 5);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.corpus.path, PathBuf::from("Quran.csv"));
        assert_eq!(config.index.collection, "quran_separate_verses_v3");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.retrieval.n_results, 3);
        assert!(config.output.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[llm]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("llm"))
        ));
    }

    #[test]
    fn test_validate_zero_results_and_history() {
        let mut config = FileConfig::default();
        config.retrieval.n_results = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::Params(DomainError::InvalidResultCount))
        ));

        let mut config = FileConfig::default();
        config.session.max_history = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::Params(DomainError::InvalidHistoryLimit))
        ));
        assert!(config.session_params().is_err());
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.llm.model = Model::Custom("  ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_params_conversion() {
        let mut config = FileConfig::default();
        config.retrieval.radius = 4;
        config.session.max_history = 2;

        assert_eq!(config.retrieval_params().radius, 4);
        let session = config.session_params().unwrap();
        assert_eq!(session.max_history.get(), 2);
        assert_eq!(session.model, Model::Llama3_70b);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = FileConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.llm.base_url, config.llm.base_url);
        assert_eq!(parsed.session.system_prompt, config.session.system_prompt);
    }
}
