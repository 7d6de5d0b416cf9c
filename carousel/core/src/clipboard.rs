//! Clipboard Exporter
//!
//! Serializes the carousel into plain text and hands it to a clipboard sink.

use async_trait::async_trait;
use thiserror::Error;

use crate::slides::Slide;

/// Clipboard write failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The sink refused or failed the write
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Destination for exported text
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    /// Write `text` to the clipboard
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Render slides as numbered plain text
///
/// Each slide becomes `"<n>. <title> <emoji>\n<content>"`, numbered from 1;
/// slides are separated by a blank line.
#[must_use]
pub fn export_text(slides: &[Slide]) -> String {
    slides
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {} {}\n{}", i + 1, s.title, s.emoji, s.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
