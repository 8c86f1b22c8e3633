//! Completion endpoint providers.

pub mod openai;

pub use openai::OpenAiCompatGateway;
