//! Notification domain module.
//!
//! Timed, pausable, independently-dismissible notification entries and the
//! queue that owns them.

mod model;
mod queue;

// Re-export public API
pub use model::{
    DEFAULT_DURATION_MS, NotificationEntry, NotificationKind,
    NotificationRemoval, RemovalReason,
};
pub use queue::NotificationQueue;
