//! Active Selection
//!
//! A cursor into the slide store. Every method takes the current slide count
//! so the cursor stays in `[0, len - 1]` after any mutation.

use serde::{Deserialize, Serialize};

/// Cursor over the slide collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSelection {
    index: usize,
}

impl ActiveSelection {
    /// Current index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Select `index`, clamped into `[0, len - 1]`
    pub fn select(&mut self, index: usize, len: usize) {
        self.index = index.min(len.saturating_sub(1));
    }

    /// Move to the slide appended at the end
    pub fn on_append(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }

    /// Step back by one after a removal
    ///
    /// The removed position is not tracked: selection always moves to
    /// `max(0, index - 1)`, even if the selected slide did not shift.
    pub fn on_remove(&mut self, len: usize) {
        self.index = self.index.saturating_sub(1).min(len.saturating_sub(1));
    }

    /// Back to the first slide
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move one slide forward, stopping at the end
    pub fn step_forward(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Move one slide back, stopping at the start
    pub fn step_backward(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}
