use serde::{Deserialize, Serialize};

use amora_core::conversation::Message;
use amora_core::notification::NotificationEntry;

/// High-level events the engine publishes to its presentation layer.
///
/// The engine renders nothing; a consumer receives these over the channel
/// returned by [`Session::start`](super::Session::start) and draws whatever
/// it likes from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Fired after every append or status transition, carrying the full
    /// current ordered message sequence.
    MessagesChanged { messages: Vec<Message> },
    /// Fired after every enqueue, tick-expiry, and dismiss, carrying the
    /// active notification entries.
    NotificationsChanged {
        notifications: Vec<NotificationEntry>,
    },
    /// Fired after each relationship increment.
    RelationshipChanged { level: u8 },
    /// Fired once when the check-in reminder timer elapses.
    CheckInDue { partner_name: String },
}
