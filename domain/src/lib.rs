//! Domain layer for verse-rag
//!
//! This crate contains the core entities and value objects of the
//! retrieval-augmented chatbot. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Verses
//!
//! The corpus is an ordered [`VerseStore`] of [`VerseRecord`]s. The similarity
//! index refers to verses through opaque [`VerseId`] tokens that encode a
//! position in the store.
//!
//! ## Context
//!
//! A [`ContextBundle`] holds the direct hits of one retrieval and the
//! neighbor windows expanded around each hit. A [`ContextPayload`] is the
//! shape of context handed to the conversation and embedded in the
//! system instruction.
//!
//! ## Conversation
//!
//! [`Message`]s with a [`Role`] flow through a [`BoundedHistory`] that keeps
//! only the most recent exchanges.

pub mod config;
pub mod context;
pub mod core;
pub mod prompt;
pub mod session;
pub mod util;
pub mod verse;

// Re-export commonly used types
pub use config::OutputFormat;
pub use context::{bundle::ContextBundle, payload::ContextPayload};
pub use core::{error::DomainError, model::Model, question::Question};
pub use prompt::{PromptTemplate, REFUSAL};
pub use session::{
    entities::{Message, Role},
    history::BoundedHistory,
};
pub use verse::{
    entities::{VerseRecord, VerseStore},
    identifier::{VerseId, VerseIdError},
    window::window_bounds,
};
