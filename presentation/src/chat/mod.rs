//! Interactive chat module
//!
//! Provides a readline-based interactive chat over the verse corpus.

mod repl;

pub use repl::{ChatRepl, CommandOutcome};
