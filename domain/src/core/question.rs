//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question asked about the corpus (Value Object)
///
/// Used both as the similarity search query and as the user turn
/// sent to the completion model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What does the text say about patience?").unwrap();
        assert_eq!(q.content(), "What does the text say about patience?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
    }

    #[test]
    fn test_try_from_str() {
        let q: Question = "What is charity?".try_into().unwrap();
        assert_eq!(q.to_string(), "What is charity?");

        let err = Question::try_from("\n\t").unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestion(_)));
    }
}
