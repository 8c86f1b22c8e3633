//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use verse_rag_application::{AskOutput, AskQuestionUseCase, ChatSession};
use verse_rag_domain::{DomainError, Question};

/// Result of a slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the text and keep reading
    Continue(String),
    /// Leave the chat
    Exit,
}

/// Interactive chat REPL
///
/// Owns one [`ChatSession`]; every question goes through the same
/// [`AskQuestionUseCase`] so retrieval settings stay fixed for the chat.
pub struct ChatRepl {
    use_case: AskQuestionUseCase,
    session: ChatSession,
    show_progress: bool,
    show_context: bool,
    last_output: Option<AskOutput>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: AskQuestionUseCase, session: ChatSession) -> Self {
        Self {
            use_case,
            session,
            show_progress: true,
            show_context: true,
            last_output: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set whether to print retrieved verses after each answer
    pub fn with_context(mut self, show: bool) -> Self {
        self.show_context = show;
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("verse-rag").join("history.txt"))
    }

    /// Create the parent directory of the history file, if any.
    fn prepare_history_dir(history_path: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = &history_path
            && let Some(parent) = path.parent()
        {
            let _ = std::fs::create_dir_all(parent);
        }
        history_path
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = Self::prepare_history_dir(Self::history_path());
        if let Some(path) = &history_path {
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_command(line) {
                            CommandOutcome::Continue(text) => println!("{}", text),
                            CommandOutcome::Exit => {
                                println!("Bye!");
                                break;
                            }
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    println!();
                    match self.ask(line).await {
                        Ok(text) => println!("{}", text),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            verse-rag - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.session.model());
        let params = self.use_case.params();
        println!(
            "Retrieval: {} verses, radius {}",
            params.n_results, params.radius
        );
        println!();
        println!("{}", Self::help_text());
    }

    fn help_text() -> String {
        [
            "Commands:",
            "  /help, /h, /?     - Show this help",
            "  /context          - Show the context of the last answer",
            "  /history          - Show how many exchanges are remembered",
            "  /clear            - Start a new conversation",
            "  /quit, /exit, /q  - Exit chat",
        ]
        .join("\n")
    }

    /// Handle a slash command
    pub fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => CommandOutcome::Exit,
            "/help" | "/h" | "/?" => CommandOutcome::Continue(Self::help_text()),
            "/context" => CommandOutcome::Continue(match &self.last_output {
                Some(output) => format!(
                    "{}\n{}",
                    ConsoleFormatter::format_context(&output.bundle),
                    ConsoleFormatter::format_expanded(&output.bundle)
                ),
                None => "No context retrieved yet.".to_string(),
            }),
            "/history" => {
                let history = self.session.history();
                CommandOutcome::Continue(format!(
                    "{} of {} exchanges remembered",
                    history.len() / 2,
                    history.max_exchanges()
                ))
            }
            "/clear" => {
                self.session.reset();
                self.last_output = None;
                CommandOutcome::Continue("Conversation cleared.".green().to_string())
            }
            _ => CommandOutcome::Continue(format!(
                "Unknown command: {}\nType /help for available commands",
                cmd
            )),
        }
    }

    /// Ask one question in the running conversation and format the reply
    pub async fn ask(&mut self, line: &str) -> Result<String, DomainError> {
        let question = Question::try_from(line)?;

        let progress = if self.show_progress {
            ProgressReporter::spinner("Searching verses and asking the model...")
        } else {
            ProgressReporter::hidden()
        };
        let output = self.use_case.execute(&mut self.session, &question).await;
        progress.finish();

        let text = if self.show_context {
            ConsoleFormatter::format(&output)
        } else {
            ConsoleFormatter::format_answer_only(&output)
        };
        self.last_output = Some(output);
        Ok(text)
    }
}
