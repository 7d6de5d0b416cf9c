//! Carousel State
//!
//! The slide store and active selection bundled together, with one pure
//! reducer per synchronous edit. Every transition keeps both invariants:
//!
//! - the store holds at least one slide
//! - `0 <= active_index < len`

use serde::{Deserialize, Serialize};

use crate::selection::ActiveSelection;
use crate::slides::{BackgroundStyle, Slide, SlideField, SlideStore, SlideTemplate};

/// A synchronous edit of the carousel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideEdit {
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
    /// Remove the slide at a position
    RemoveSlide {
        /// Slide position
        index: usize,
    },
    /// Broadcast one background to every slide
    ApplyStyleToAll {
        /// Style to apply
        style: BackgroundStyle,
    },
    /// Select a slide (clamped)
    Select {
        /// Requested position
        index: usize,
    },
    /// Select the next slide
    StepForward,
    /// Select the previous slide
    StepBackward,
}

/// Slides plus selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselState {
    store: SlideStore,
    selection: ActiveSelection,
    template: SlideTemplate,
}

impl CarouselState {
    /// Create state over an existing store, selecting the first slide
    #[must_use]
    pub fn new(store: SlideStore, template: SlideTemplate) -> Self {
        Self {
            store,
            selection: ActiveSelection::default(),
            template,
        }
    }

    /// The slide store
    #[must_use]
    pub fn store(&self) -> &SlideStore {
        &self.store
    }

    /// Slides in order
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        self.store.slides()
    }

    /// Index of the selected slide
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.selection.index()
    }

    /// Apply an edit in place
    ///
    /// Returns true if anything observable changed.
    pub fn apply(&mut self, edit: &SlideEdit) -> bool {
        let before = self.selection.index();
        match edit {
            SlideEdit::UpdateField {
                index,
                field,
                value,
            } => {
                self.store.update_field(*index, *field, value.clone());
                true
            }
            SlideEdit::AddSlide => {
                self.store.add_slide(&self.template);
                self.selection.on_append(self.store.len());
                true
            }
            SlideEdit::RemoveSlide { index } => {
                if self.store.remove_slide(*index) {
                    self.selection.on_remove(self.store.len());
                    true
                } else {
                    false
                }
            }
            SlideEdit::ApplyStyleToAll { style } => {
                self.store.apply_background_to_all(style);
                true
            }
            SlideEdit::Select { index } => {
                self.selection.select(*index, self.store.len());
                self.selection.index() != before
            }
            SlideEdit::StepForward => {
                self.selection.step_forward(self.store.len());
                self.selection.index() != before
            }
            SlideEdit::StepBackward => {
                self.selection.step_backward();
                self.selection.index() != before
            }
        }
    }

    /// Swap in a generated collection and select its first slide
    ///
    /// Returns false if `slides` was empty; the state is then unchanged.
    pub fn replace_slides(&mut self, slides: Vec<Slide>) -> bool {
        if self.store.replace_all(slides) {
            self.selection.reset();
            true
        } else {
            false
        }
    }
}

/// Pure reducer: `(state, edit) -> state`
#[must_use]
pub fn reduce(mut state: CarouselState, edit: &SlideEdit) -> CarouselState {
    state.apply(edit);
    state
}
