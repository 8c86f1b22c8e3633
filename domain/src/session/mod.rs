//! Conversation session domain.
//!
//! - [`entities::Message`]: a single turn within a conversation
//! - [`history::BoundedHistory`]: the most recent exchanges of a session

pub mod entities;
pub mod history;
