//! Generator Payload Decoding
//!
//! Models are asked for a raw JSON array but regularly wrap it in a markdown
//! code fence anyway. [`decode_payload`] strips the fences and parses the
//! text; [`slides_from_payload`] checks the parsed value has the expected
//! shape.

use serde::{Deserialize, Deserializer, Serialize};

use super::traits::GenerationError;

/// One `{ title, content, emoji }` triple returned by a generator
///
/// Missing or null `title`/`content` decode as empty strings, and numbers or
/// booleans become their text. A missing or blank emoji is filled in when the
/// slide is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSlide {
    /// Short punchy title
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Brief explanation
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    /// Single emoji
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub emoji: Option<String>,
}

/// Text form of a JSON field; `None` for null
fn text_of(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(serde_json::Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_of(serde_json::Value::deserialize(deserializer)?))
}

impl GeneratedSlide {
    /// Create a triple
    pub fn new(title: impl Into<String>, content: impl Into<String>, emoji: Option<&str>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            emoji: emoji.map(String::from),
        }
    }
}

/// Parse generator text output, tolerating markdown code fences
///
/// # Errors
///
/// Returns [`GenerationError::Format`] if the text is not valid JSON.
pub fn decode_payload(text: &str) -> Result<serde_json::Value, GenerationError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).map_err(|e| GenerationError::Format(e.to_string()))
}

/// Validate a parsed payload as a non-empty sequence of triples
///
/// # Errors
///
/// - [`GenerationError::NotASequence`] if the value is not an array
/// - [`GenerationError::Format`] if an element is not a triple object
/// - [`GenerationError::EmptySequence`] if the array is empty
pub fn slides_from_payload(
    value: serde_json::Value,
) -> Result<Vec<GeneratedSlide>, GenerationError> {
    if !value.is_array() {
        return Err(GenerationError::NotASequence);
    }
    let slides: Vec<GeneratedSlide> =
        serde_json::from_value(value).map_err(|e| GenerationError::Format(e.to_string()))?;
    if slides.is_empty() {
        return Err(GenerationError::EmptySequence);
    }
    Ok(slides)
}
