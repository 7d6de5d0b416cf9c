//! Surface Intents
//!
//! Intents sent from a rendering surface to the carousel manager. Surfaces
//! report what the user asked for; the manager decides what it means.

use serde::{Deserialize, Serialize};

use crate::backend::Tone;
use crate::messages::Format;
use crate::slides::{BackgroundStyle, SlideField};
use crate::state::SlideEdit;

/// Intents from a surface to the manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselIntent {
    // ============================================
    // Generation Inputs
    // ============================================
    /// Topic text changed
    SetTopic {
        /// New topic (untrimmed)
        topic: String,
    },

    /// Tone changed
    SetTone {
        /// New tone
        tone: Tone,
    },

    /// Output format changed
    SetFormat {
        /// New format
        format: Format,
    },

    /// Generate slides from the current topic and tone
    Generate,

    // ============================================
    // Slide Editing
    // ============================================
    /// Replace one field of one slide
    UpdateField {
        /// Slide position
        index: usize,
        /// Field to replace
        field: SlideField,
        /// New value
        value: String,
    },

    /// Append a placeholder slide
    AddSlide,

    /// Remove a slide
    RemoveSlide {
        /// Slide position
        index: usize,
    },

    /// Use one background on every slide
    ApplyStyleToAll {
        /// Style to apply
        style: BackgroundStyle,
    },

    // ============================================
    // Selection
    // ============================================
    /// Select a slide
    SelectSlide {
        /// Slide position (clamped)
        index: usize,
    },

    /// Select the next slide
    StepForward,

    /// Select the previous slide
    StepBackward,

    // ============================================
    // Output
    // ============================================
    /// Copy the carousel as text
    ExportText,

    /// Hide the current notification
    DismissNotification,
}

impl CarouselIntent {
    /// The synchronous slide edit this intent maps to, if any
    #[must_use]
    pub fn as_edit(&self) -> Option<SlideEdit> {
        match self {
            Self::UpdateField {
                index,
                field,
                value,
            } => Some(SlideEdit::UpdateField {
                index: *index,
                field: *field,
                value: value.clone(),
            }),
            Self::AddSlide => Some(SlideEdit::AddSlide),
            Self::RemoveSlide { index } => Some(SlideEdit::RemoveSlide { index: *index }),
            Self::ApplyStyleToAll { style } => Some(SlideEdit::ApplyStyleToAll {
                style: style.clone(),
            }),
            Self::SelectSlide { index } => Some(SlideEdit::Select { index: *index }),
            Self::StepForward => Some(SlideEdit::StepForward),
            Self::StepBackward => Some(SlideEdit::StepBackward),
            Self::SetTopic { .. }
            | Self::SetTone { .. }
            | Self::SetFormat { .. }
            | Self::Generate
            | Self::ExportText
            | Self::DismissNotification => None,
        }
    }
}
