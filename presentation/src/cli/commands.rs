//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use verse_rag_domain::OutputFormat;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Answer followed by the retrieved verses
    Text,
    /// Only the answer
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Answer => OutputFormat::Answer,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for verse-rag
#[derive(Parser, Debug)]
#[command(name = "verse-rag")]
#[command(author, version, about = "Ask questions answered only from a verse corpus")]
#[command(long_about = r#"
verse-rag answers questions using only verses retrieved from a corpus.

For every question:
1. Retrieve: the similarity index returns the closest verses
2. Expand: each hit is widened with its neighboring verses
3. Answer: the model replies from that context, or says it does not know

Configuration files are loaded from (in priority order):
1. VERSE_RAG_* environment variables (e.g. VERSE_RAG_LLM__MODEL)
2. --config <path>        Explicit config file
3. ./verse-rag.toml       Project-level config
4. ~/.config/verse-rag/config.toml   Global config

The API key is read from the variable named by llm.api_key_env
(GROQ_API_KEY by default).

Example:
  verse-rag "What is said about patience?"
  verse-rag -n 5 --radius 2 "Who was Moses?"
  verse-rag --chat --max-history 3
"#)]
pub struct Cli {
    /// The question to ask (omit in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "question")]
    pub chat: bool,

    /// Number of verses retrieved per question
    #[arg(short, long, value_name = "N")]
    pub n_results: Option<usize>,

    /// Neighboring verses added around each hit
    #[arg(short, long, value_name = "N")]
    pub radius: Option<usize>,

    /// Exchanges kept in the conversation
    #[arg(long, value_name = "N")]
    pub max_history: Option<usize>,

    /// Completion model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Do not print the retrieved verses after the answer
    #[arg(long)]
    pub no_context: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
