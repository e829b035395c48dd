//! Notification domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime budget of a notification, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Severity or category for user-visible notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates an error or failure.
    Error,
    /// Neutral informational message.
    Info,
}

/// One timed, pausable, dismissible notification entry.
///
/// Invariant: `elapsed_ms <= duration_ms`. An entry whose elapsed time
/// reaches its duration is removed from the queue exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The text content to display to the user.
    pub message: String,
    /// The kind of the notification, determining its visual style.
    pub kind: NotificationKind,
    /// Total lifetime budget in milliseconds.
    pub duration_ms: u64,
    /// Accumulated active (non-paused) time in milliseconds.
    pub elapsed_ms: u64,
    /// While true, elapsed time does not accrue.
    pub paused: bool,
}

impl NotificationEntry {
    /// Creates a new entry with zero elapsed time.
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            duration_ms: duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            elapsed_ms: 0,
            paused: false,
        }
    }

    /// Remaining lifetime in milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Consumed share of the lifetime, in `0.0..=100.0`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 100.0;
        }
        (self.elapsed_ms as f64 / self.duration_ms as f64 * 100.0).min(100.0)
    }
}

/// Why an entry left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// The entry's elapsed time reached its duration.
    Expired,
    /// The consumer dismissed the entry before it expired.
    Dismissed,
}

/// Removal event fired exactly once per entry, for both terminal states,
/// so consumers need a single handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRemoval {
    /// Id of the removed entry.
    pub id: Uuid,
    /// Whether the entry expired or was dismissed.
    pub reason: RemovalReason,
}
