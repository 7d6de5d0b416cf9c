//! Notification Queue
//!
//! Holds at most one transient, user-facing message. Every push replaces the
//! current notification and re-arms its expiry deadline; the manager's run
//! loop sleeps until [`NotificationQueue::deadline`] and then calls
//! [`NotificationQueue::expire`].
//!
//! Deadlines use `tokio::time::Instant` so a paused test clock drives them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Default time a notification stays visible
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Notification kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// A transient user-facing message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Text to show
    pub message: String,
    /// Success or error
    pub kind: NotifyKind,
    /// When the notification was raised (Unix timestamp ms)
    pub created_at_ms: u64,
}

impl Notification {
    /// Create a notification stamped with the current time
    pub fn new(message: impl Into<String>, kind: NotifyKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at_ms: now_ms(),
        }
    }
}

#[derive(Clone, Debug)]
struct Armed {
    notification: Notification,
    expires_at: Instant,
}

/// Single-slot notification holder with expiry
#[derive(Clone, Debug)]
pub struct NotificationQueue {
    ttl: Duration,
    current: Option<Armed>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationQueue {
    /// Create a queue whose notifications live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Show `message`, replacing any current notification
    pub fn push(&mut self, message: impl Into<String>, kind: NotifyKind) {
        let notification = Notification::new(message, kind);
        tracing::debug!(message = %notification.message, kind = ?kind, "Notification pushed");
        self.current = Some(Armed {
            notification,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Remove the current notification immediately
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The visible notification, if any
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|a| &a.notification)
    }

    /// When the current notification expires
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|a| a.expires_at)
    }

    /// Clear the notification if its deadline has passed
    ///
    /// Returns true if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.current {
            Some(ref armed) if armed.expires_at <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

/// Get current timestamp in milliseconds
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
