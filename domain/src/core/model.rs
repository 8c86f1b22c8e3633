//! Model value object representing a completion model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion models known to the chatbot (Value Object)
///
/// Any identifier the endpoint accepts can be used through
/// [`Model::Custom`]; the named variants are the ones served by the
/// default OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Llama3_70b,
    Llama3_8b,
    Llama31_8bInstant,
    Llama33_70bVersatile,
    Mixtral8x7b,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Llama3_70b => "llama3-70b-8192",
            Model::Llama3_8b => "llama3-8b-8192",
            Model::Llama31_8bInstant => "llama-3.1-8b-instant",
            Model::Llama33_70bVersatile => "llama-3.3-70b-versatile",
            Model::Mixtral8x7b => "mixtral-8x7b-32768",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (Llama 3 70B)
    fn default() -> Self {
        Model::Llama3_70b
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "llama3-70b-8192" => Model::Llama3_70b,
            "llama3-8b-8192" => Model::Llama3_8b,
            "llama-3.1-8b-instant" => Model::Llama31_8bInstant,
            "llama-3.3-70b-versatile" => Model::Llama33_70bVersatile,
            "mixtral-8x7b-32768" => Model::Mixtral8x7b,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
