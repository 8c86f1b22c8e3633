//! Context payload value object

use serde::{Deserialize, Serialize};

/// Context supplied to a conversation turn.
///
/// Callers pass either free text or grouped verse windows; [`render`]
/// is the single serialization used when embedding context in the system
/// instruction.
///
/// [`render`]: ContextPayload::render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextPayload {
    Text(String),
    Groups(Vec<Vec<String>>),
}

impl ContextPayload {
    /// Serialize the context for the system instruction.
    ///
    /// Text is embedded unchanged. Groups become blocks of one verse per
    /// line, with a blank line between groups. Empty context renders as an
    /// empty string.
    pub fn render(&self) -> String {
        match self {
            ContextPayload::Text(text) => text.clone(),
            ContextPayload::Groups(groups) => groups
                .iter()
                .map(|group| group.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ContextPayload::Text(text) => text.is_empty(),
            ContextPayload::Groups(groups) => groups.iter().all(Vec::is_empty),
        }
    }
}

impl Default for ContextPayload {
    fn default() -> Self {
        ContextPayload::Text(String::new())
    }
}

impl From<String> for ContextPayload {
    fn from(text: String) -> Self {
        ContextPayload::Text(text)
    }
}

impl From<&str> for ContextPayload {
    fn from(text: &str) -> Self {
        ContextPayload::Text(text.to_string())
    }
}

impl From<Vec<Vec<String>>> for ContextPayload {
    fn from(groups: Vec<Vec<String>>) -> Self {
        ContextPayload::Groups(groups)
    }
}

impl std::fmt::Display for ContextPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
