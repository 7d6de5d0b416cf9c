//! Snapshots for Surfaces
//!
//! What the manager hands to rendering surfaces after every state change.
//! Snapshots are owned copies: a surface can keep, diff or serialize them but
//! has no way to mutate the manager's state through them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::Tone;
use crate::notifications::Notification;
use crate::slides::Slide;

/// Output format of the carousel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Square feed post (1:1)
    #[default]
    Feed,
    /// Vertical story (9:16)
    Story,
}

impl Format {
    /// Aspect ratio as `(width, height)`
    #[must_use]
    pub fn aspect_ratio(&self) -> (u32, u32) {
        match self {
            Self::Feed => (1, 1),
            Self::Story => (9, 16),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed => f.write_str("feed"),
            Self::Story => f.write_str("story"),
        }
    }
}

/// A format name outside [`Format`]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown format: {0} (expected feed or story)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feed" => Ok(Self::Feed),
            "story" => Ok(Self::Story),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Renderable state of the manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    /// Slides in order
    pub slides: Vec<Slide>,
    /// Index of the selected slide
    pub active_index: usize,
    /// Output format
    pub format: Format,
    /// Topic as typed
    pub topic: String,
    /// Selected tone
    pub tone: Tone,
    /// Whether a generation request is in flight
    pub is_generating: bool,
    /// Visible notification
    pub notification: Option<Notification>,
}

impl CarouselSnapshot {
    /// The selected slide
    #[must_use]
    pub fn active_slide(&self) -> Option<&Slide> {
        self.slides.get(self.active_index)
    }
}
