//! Retrieved context domain.
//!
//! - [`bundle::ContextBundle`]: direct hits and expanded neighbor windows
//!   of one retrieval
//! - [`payload::ContextPayload`]: context as handed to a conversation turn

pub mod bundle;
pub mod payload;
