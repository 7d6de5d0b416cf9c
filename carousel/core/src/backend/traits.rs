//! Content Generator Traits
//!
//! Trait definitions for the external content generator. The manager only
//! knows this contract; transport, authentication and prompt construction live
//! in whatever implements it (an HTTP adapter, a test double, ...).

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stylistic mode sent with a generation request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Authoritative, informative
    #[default]
    Expert,
    /// Light and playful
    Funny,
    /// Energetic, encouraging
    Motivational,
}

impl Tone {
    /// All tones, in display order
    pub const ALL: [Tone; 3] = [Tone::Expert, Tone::Funny, Tone::Motivational];

    /// Wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Funny => "funny",
            Self::Motivational => "motivational",
        }
    }

    /// Emoji a surface can show next to the tone
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Expert => "🧐",
            Self::Funny => "🤪",
            Self::Motivational => "🔥",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tone name outside [`Tone`]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown tone: {0} (expected expert, funny or motivational)")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expert" => Ok(Self::Expert),
            "funny" => Ok(Self::Funny),
            "motivational" => Ok(Self::Motivational),
            _ => Err(UnknownTone(s.to_string())),
        }
    }
}

/// Request rejected before reaching the generator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Topic was empty after trimming whitespace
    #[error("Topic is empty")]
    EmptyTopic,
}

/// A validated generation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    topic: String,
    tone: Tone,
}

impl GenerationRequest {
    /// Validate and build a request
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTopic`] if `topic` is blank.
    pub fn new(topic: &str, tone: Tone) -> Result<Self, ValidationError> {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        Ok(Self {
            topic: trimmed.to_string(),
            tone,
        })
    }

    /// Topic, trimmed
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Requested tone
    #[must_use]
    pub fn tone(&self) -> Tone {
        self.tone
    }
}

/// Ways a generation can fail
///
/// Every variant collapses to the same user-facing failure; the detail is
/// only logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generator answered with a non-success status
    #[error("Generator returned {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Payload could not be parsed into the expected structure
    #[error("Malformed payload: {0}")]
    Format(String),

    /// Payload parsed but was not a sequence
    #[error("Payload is not a sequence")]
    NotASequence,

    /// Payload was an empty sequence
    #[error("Payload contained no slides")]
    EmptySequence,

    /// No answer within the configured deadline
    #[error("Generation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Content generator trait
///
/// Implement this to connect the manager to a generative model. The returned
/// value is expected to be a JSON array of `{ title, content, emoji }`
/// objects; the manager validates the shape itself.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generator name (for logs)
    fn name(&self) -> &str;

    /// Produce slide content for `request`
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError>;
}
