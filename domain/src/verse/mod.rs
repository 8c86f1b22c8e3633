//! Verse corpus domain.
//!
//! - [`entities::VerseStore`]: the ordered, position-addressable corpus
//! - [`identifier::VerseId`]: the similarity index's token for a verse
//! - [`window::window_bounds`]: neighbor window arithmetic around a hit

pub mod entities;
pub mod identifier;
pub mod window;
