//! Verse identifier value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters stripped from the front of an identifier before parsing.
const PREFIX_CHARS: &[char] = &['i', 'd'];

/// Reasons a verse identifier cannot be mapped to a store position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerseIdError {
    #[error("verse id '{0}' has no numeric payload")]
    Empty(String),

    #[error("verse id '{id}' is not a position: {reason}")]
    Malformed { id: String, reason: String },
}

/// Opaque identifier returned by the similarity index (Value Object)
///
/// Identifiers encode a verse position as a numeric suffix after an
/// `id` prefix, e.g. `id6216`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerseId(String);

impl VerseId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the identifier into a 0-based store position.
    ///
    /// Every leading `i` and `d` character is stripped, and the remainder
    /// (whitespace-trimmed) must be a non-negative integer.
    pub fn position(&self) -> Result<usize, VerseIdError> {
        let payload = self.0.trim_start_matches(PREFIX_CHARS).trim();
        if payload.is_empty() {
            return Err(VerseIdError::Empty(self.0.clone()));
        }
        payload.parse::<usize>().map_err(|e| VerseIdError::Malformed {
            id: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Display for VerseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VerseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VerseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed_id() {
        assert_eq!(VerseId::from("id6216").position(), Ok(6216));
        assert_eq!(VerseId::from("id0").position(), Ok(0));
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(VerseId::from("42").position(), Ok(42));
    }

    #[test]
    fn test_strips_repeated_prefix_chars() {
        assert_eq!(VerseId::from("iddi7").position(), Ok(7));
    }

    #[test]
    fn test_non_numeric_payload_is_malformed() {
        let err = VerseId::from("idABC").position().unwrap_err();
        assert!(matches!(err, VerseIdError::Malformed { ref id, .. } if id == "idABC"));
    }

    #[test]
    fn test_negative_payload_is_rejected() {
        assert!(VerseId::from("id-3").position().is_err());
    }

    #[test]
    fn test_prefix_only_is_empty() {
        assert_eq!(
            VerseId::from("id").position(),
            Err(VerseIdError::Empty("id".to_string()))
        );
    }
}
