//! Slide Store
//!
//! The ordered slide collection and its field-level mutation primitives.
//!
//! # Invariant
//!
//! The store never holds fewer than one slide. Removal of the last remaining
//! slide is refused, and an empty replacement is refused. Selection is not
//! tracked here; see [`crate::selection`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slide identifier
///
/// Monotonic for the lifetime of the process and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlideId(pub u64);

impl SlideId {
    /// Generate a new unique slide ID
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slide_{}", self.0)
    }
}

/// Opaque background style token
///
/// The core never interprets the value; surfaces map it to a visual treatment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundStyle(pub String);

impl BackgroundStyle {
    /// Create a style token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BackgroundStyle {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// One content unit of the carousel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable identifier
    pub id: SlideId,
    /// Short headline
    pub title: String,
    /// Short body text
    pub content: String,
    /// Single grapheme or short string
    pub emoji: String,
    /// Visual treatment token
    pub background: BackgroundStyle,
}

impl Slide {
    /// Create a slide with a freshly generated ID
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        emoji: impl Into<String>,
        background: BackgroundStyle,
    ) -> Self {
        Self {
            id: SlideId::generate(),
            title: title.into(),
            content: content.into(),
            emoji: emoji.into(),
            background,
        }
    }

    /// Replace one field
    pub fn set(&mut self, field: SlideField, value: String) {
        match field {
            SlideField::Title => self.title = value,
            SlideField::Content => self.content = value,
            SlideField::Emoji => self.emoji = value,
            SlideField::Background => self.background = BackgroundStyle(value),
        }
    }

    /// Read one field as text
    #[must_use]
    pub fn get(&self, field: SlideField) -> &str {
        match field {
            SlideField::Title => &self.title,
            SlideField::Content => &self.content,
            SlideField::Emoji => &self.emoji,
            SlideField::Background => self.background.as_str(),
        }
    }
}

/// The closed set of editable slide fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideField {
    /// Headline
    Title,
    /// Body text
    Content,
    /// Emoji decoration
    Emoji,
    /// Background style token
    Background,
}

impl SlideField {
    /// Wire name of the field
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Emoji => "emoji",
            Self::Background => "background",
        }
    }
}

/// A field key outside [`SlideField`]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown slide field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SlideField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "emoji" => Ok(Self::Emoji),
            "background" | "bg" => Ok(Self::Background),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Placeholder values for hand-added slides
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideTemplate {
    /// Title of a new slide
    pub title: String,
    /// Body of a new slide
    pub content: String,
    /// Emoji of a new slide
    pub emoji: String,
    /// Background used only if the store were empty
    pub fallback_background: BackgroundStyle,
}

impl Default for SlideTemplate {
    fn default() -> Self {
        Self {
            title: "New slide".to_string(),
            content: "Text...".to_string(),
            emoji: "📝".to_string(),
            fallback_background: BackgroundStyle::new(crate::config::DEFAULT_PALETTE[0]),
        }
    }
}

/// Ordered slide collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlideStore {
    slides: Vec<Slide>,
}

impl SlideStore {
    /// Create a store from an initial collection
    ///
    /// Returns `None` if `slides` is empty.
    #[must_use]
    pub fn new(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            None
        } else {
            Some(Self { slides })
        }
    }

    /// The starter carousel shown before anything is generated
    #[must_use]
    pub fn starter(palette: &[BackgroundStyle]) -> Self {
        let bg = |i: usize| {
            palette
                .get(i % palette.len().max(1))
                .cloned()
                .unwrap_or_else(|| BackgroundStyle::new(crate::config::DEFAULT_PALETTE[i]))
        };
        Self {
            slides: vec![
                Slide::new(
                    "How to start?",
                    "Enter a topic and hit generate ✨",
                    "👋",
                    bg(0),
                ),
                Slide::new(
                    "Editor",
                    "Change the text and backgrounds, or add slides by hand.",
                    "🎨",
                    bg(1),
                ),
            ],
        }
    }

    /// Number of slides (always at least 1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slides in order
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Background of every slide, in order
    #[must_use]
    pub fn backgrounds(&self) -> Vec<BackgroundStyle> {
        self.slides.iter().map(|s| s.background.clone()).collect()
    }

    /// Append a placeholder slide inheriting the last slide's background
    ///
    /// Returns the index of the new slide.
    pub fn add_slide(&mut self, template: &SlideTemplate) -> usize {
        let background = self
            .slides
            .last()
            .map_or_else(|| template.fallback_background.clone(), |s| s.background.clone());

        let slide = Slide::new(
            template.title.clone(),
            template.content.clone(),
            template.emoji.clone(),
            background,
        );
        tracing::debug!(id = %slide.id, "Slide added");
        self.slides.push(slide);
        self.slides.len() - 1
    }

    /// Remove the slide at `index`
    ///
    /// Refused when only one slide remains or `index` is out of range.
    /// Returns true if the collection changed.
    pub fn remove_slide(&mut self, index: usize) -> bool {
        if self.slides.len() <= 1 {
            tracing::debug!(index, "Refusing to remove the last slide");
            return false;
        }
        if index >= self.slides.len() {
            tracing::debug!(index, len = self.slides.len(), "Remove index out of range");
            return false;
        }
        let removed = self.slides.remove(index);
        tracing::debug!(id = %removed.id, index, "Slide removed");
        true
    }

    /// Replace one field of the slide at `index`
    ///
    /// Surfaces only address existing slides, so an out-of-range index is a
    /// bug: it panics in debug builds and is ignored in release builds.
    pub fn update_field(&mut self, index: usize, field: SlideField, value: String) {
        debug_assert!(
            index < self.slides.len(),
            "update_field index {index} out of range (len {})",
            self.slides.len()
        );
        match self.slides.get_mut(index) {
            Some(slide) => slide.set(field, value),
            None => {
                tracing::warn!(
                    index,
                    field = field.as_str(),
                    len = self.slides.len(),
                    "Ignoring update for missing slide"
                );
            }
        }
    }

    /// Set every slide's background to `style`
    pub fn apply_background_to_all(&mut self, style: &BackgroundStyle) {
        for slide in &mut self.slides {
            slide.background = style.clone();
        }
    }

    /// Substitute the whole collection
    ///
    /// Returns false (and leaves the store untouched) if `slides` is empty.
    pub fn replace_all(&mut self, slides: Vec<Slide>) -> bool {
        if slides.is_empty() {
            tracing::warn!("Refusing to replace carousel with an empty collection");
            return false;
        }
        self.slides = slides;
        true
    }
}
