//! OpenAI-compatible Chat Completions provider
//!
//! Works against any endpoint speaking the `/chat/completions` protocol
//! (Groq, OpenAI, local servers) with optional bearer authentication.

mod gateway;
mod types;

pub use gateway::OpenAiCompatGateway;
