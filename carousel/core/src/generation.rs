//! Generation Controller
//!
//! A single-flight state machine around the content generator:
//!
//! ```text
//!          generate (blank topic) ──► error notification
//!         ┌──────────────────────────────────────────┐
//!         ▼                                          │
//!       Idle ──generate──► Pending ──► Succeeded ────┤
//!                             │                      │
//!                             └──────► Failed ───────┘
//! ```
//!
//! `Succeeded` and `Failed` are not resting states: each outcome is applied
//! immediately and the controller is back to `Idle`. While `Pending`, further
//! generate requests are dropped.
//!
//! The backgrounds of the pre-request carousel are captured when the request
//! starts, so positional carry-over does not depend on edits made while the
//! request is in flight. Those edits are still replaced on success.

use serde::{Deserialize, Serialize};

use crate::backend::{GeneratedSlide, GenerationError, GenerationRequest};
use crate::slides::{BackgroundStyle, Slide};

/// Result of one generator round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Generator produced slide triples
    Succeeded(Vec<GeneratedSlide>),
    /// Any failure, folded into one outcome
    Failed(GenerationError),
}

impl From<Result<Vec<GeneratedSlide>, GenerationError>> for GenerationOutcome {
    fn from(result: Result<Vec<GeneratedSlide>, GenerationError>) -> Self {
        match result {
            Ok(slides) => Self::Succeeded(slides),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Ticket identifying one in-flight request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Lifecycle phase
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Nothing in flight
    #[default]
    Idle,
    /// A request is in flight
    Pending {
        /// Which request
        request_id: RequestId,
        /// Backgrounds of the carousel when the request started
        prior_backgrounds: Vec<BackgroundStyle>,
    },
}

/// What the controller decided about a generate intent
#[derive(Debug, PartialEq, Eq)]
pub enum BeginResult {
    /// Request accepted; the caller must run it and report back
    Started(RequestId, GenerationRequest),
    /// Another request is in flight; intent dropped
    Busy,
}

/// Single-flight generation state machine
#[derive(Debug, Default)]
pub struct GenerationController {
    phase: GenerationPhase,
    next_request: u64,
}

impl GenerationController {
    /// Create an idle controller
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> &GenerationPhase {
        &self.phase
    }

    /// Whether a request is in flight
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, GenerationPhase::Pending { .. })
    }

    /// Move `Idle -> Pending` for a validated request
    ///
    /// `prior_backgrounds` are the backgrounds of the carousel right now.
    pub fn begin(
        &mut self,
        request: GenerationRequest,
        prior_backgrounds: Vec<BackgroundStyle>,
    ) -> BeginResult {
        if self.is_pending() {
            return BeginResult::Busy;
        }
        self.next_request += 1;
        let request_id = RequestId(self.next_request);
        self.phase = GenerationPhase::Pending {
            request_id,
            prior_backgrounds,
        };
        BeginResult::Started(request_id, request)
    }

    /// Leave `Pending` for `request_id`
    ///
    /// Returns the captured pre-request backgrounds, or `None` if `request_id`
    /// is not the request in flight (the outcome should then be ignored).
    pub fn finish(&mut self, request_id: RequestId) -> Option<Vec<BackgroundStyle>> {
        match std::mem::take(&mut self.phase) {
            GenerationPhase::Pending {
                request_id: current,
                prior_backgrounds,
            } if current == request_id => Some(prior_backgrounds),
            other => {
                self.phase = other;
                None
            }
        }
    }
}

/// Turn generated triples into slides
///
/// Slide `k` keeps `prior_backgrounds[k]` if the pre-request carousel had a
/// slide at that position, otherwise takes `palette[k % palette.len()]`.
/// Missing or blank emoji become `default_emoji`.
#[must_use]
pub fn build_slides(
    generated: Vec<GeneratedSlide>,
    prior_backgrounds: &[BackgroundStyle],
    palette: &[BackgroundStyle],
    default_emoji: &str,
) -> Vec<Slide> {
    generated
        .into_iter()
        .enumerate()
        .map(|(k, g)| {
            let background = prior_backgrounds
                .get(k)
                .or_else(|| palette.get(k % palette.len().max(1)))
                .cloned()
                .unwrap_or_else(|| BackgroundStyle::new(crate::config::DEFAULT_PALETTE[0]));
            let emoji = g
                .emoji
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| default_emoji.to_string());
            Slide::new(g.title, g.content, emoji, background)
        })
        .collect()
}
