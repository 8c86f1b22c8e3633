//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the completion model a session talks to
//! - [`question::Question`]: a validated user question
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
