//! CLI entrypoint for verse-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use verse_rag_application::{
    AskQuestionUseCase, ChatSession, ContextRetriever, ConversationLogger, NoConversationLogger,
};
use verse_rag_domain::{Model, OutputFormat, Question};
use verse_rag_infrastructure::{
    ConfigLoader, CsvVerseLoader, FileConfig, HttpSimilarityIndex, JsonlConversationLogger,
    OpenAiCompatGateway,
};
use verse_rag_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};

fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// Install the subscriber. The returned guard flushes the file log on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_writer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "verse-rag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(verbosity_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
        }))
        .init();

    guard
}

/// Command-line flags take precedence over every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(n) = cli.n_results {
        config.retrieval.n_results = n;
    }
    if let Some(radius) = cli.radius {
        config.retrieval.radius = radius;
    }
    if let Some(max_history) = cli.max_history {
        config.session.max_history = max_history;
    }
    if let Some(model) = cli.model.as_deref() {
        config.llm.model = Model::from(model);
    }
    if let Some(format) = cli.output {
        config.output.format = format.into();
    }
    if cli.quiet {
        config.output.show_progress = false;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, config.logging.log_dir().map(|p| p.as_path()));

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting verse-rag");

    // === Dependency Injection ===
    let store = CsvVerseLoader::new(config.corpus.text_column.as_str())
        .load_path(&config.corpus.path)
        .with_context(|| {
            format!(
                "Failed to load verse table {}",
                config.corpus.path.display()
            )
        })?;
    if store.is_empty() {
        warn!("Verse table {} has no rows", config.corpus.path.display());
    }

    let index = HttpSimilarityIndex::new(
        &config.index.endpoint,
        &config.index.collection,
        config.index.timeout(),
    )?;

    let api_key = config.llm.api_key();
    if api_key.is_none() {
        warn!("{} is not set", config.llm.api_key_env);
    }
    let gateway = OpenAiCompatGateway::new(&config.llm.base_url, api_key, config.llm.timeout())?;

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log_path()
        .and_then(JsonlConversationLogger::new)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let retriever = ContextRetriever::new(Arc::new(index), Arc::new(store))
        .with_conversation_logger(conversation_logger.clone());
    let use_case = AskQuestionUseCase::new(retriever, config.retrieval_params())
        .with_conversation_logger(conversation_logger.clone());
    let mut session = ChatSession::new(Arc::new(gateway), config.session_params()?)
        .with_conversation_logger(conversation_logger);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case, session)
            .with_progress(config.output.show_progress)
            .with_context(!cli.no_context);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question.as_deref().map(Question::try_from) {
        Some(q) => q?,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let output = {
        let progress = if config.output.show_progress {
            ProgressReporter::spinner("Searching verses and asking the model...")
        } else {
            ProgressReporter::hidden()
        };
        let output = use_case.execute(&mut session, &question).await;
        progress.finish();
        output
    };

    let format = match config.output.format {
        OutputFormat::Text if cli.no_context => OutputFormat::Answer,
        other => other,
    };
    println!("{}", ConsoleFormatter.render(&output, format));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "verse-rag",
            "-n",
            "7",
            "--max-history",
            "2",
            "--model",
            "llama-3.1-8b-instant",
            "-o",
            "answer",
            "-q",
            "q",
        ]);
        let mut config = FileConfig::default();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.retrieval.n_results, 7);
        assert_eq!(config.retrieval.radius, 1);
        assert_eq!(config.session.max_history, 2);
        assert_eq!(config.llm.model.as_str(), "llama-3.1-8b-instant");
        assert_eq!(config.output.format, OutputFormat::Answer);
        assert!(!config.output.show_progress);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::parse_from(["verse-rag", "q"]);
        let mut config = FileConfig::default();
        config.retrieval.radius = 3;
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.retrieval.radius, 3);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_verbosity_filter_levels() {
        assert_eq!(verbosity_filter(0).to_string(), "warn");
        assert_eq!(verbosity_filter(2).to_string(), "debug");
        assert_eq!(verbosity_filter(9).to_string(), "trace");
    }
}
