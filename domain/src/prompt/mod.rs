//! Prompt domain
//!
//! The system instruction templates that steer the completion model.

mod template;

pub use template::{PromptTemplate, REFUSAL};
