//! System instruction templates

use crate::context::payload::ContextPayload;

/// The exact answer the model must give when the context does not help.
pub const REFUSAL: &str = "Sorry! I do not know.";

/// Templates for the system instruction of a conversation
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt a session starts with before any context is known
    pub fn initial_system() -> &'static str {
        "You are an AI assistant that only responds based on provided knowledge."
    }

    /// System instruction embedding the retrieved context for one turn
    pub fn context_system(context: &ContextPayload) -> String {
        format!(
            r#"Use the following information to answer the user's question:

Context: {}

Important: If the context is irrelevant, respond with "{}""#,
            context.render(),
            REFUSAL
        )
    }
}
