//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including the sender, delivery status, and message content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the sender of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Message from the user.
    User,
    /// Message from the scripted AI partner.
    Partner,
}

/// Delivery progression of a user message.
///
/// A user message only ever moves forward: `Pending` → `Delivered` →
/// `Acknowledged`. Partner messages carry no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Created locally, delivery confirmation still outstanding.
    Pending,
    /// Delivery has been confirmed.
    Delivered,
    /// The partner has seen the message and replied.
    Acknowledged,
}

/// A single message in the conversation log.
///
/// Messages are immutable after creation except for the delivery status of
/// user messages, which the [`ConversationLog`](super::ConversationLog)
/// advances. They are never reordered or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, generated at creation.
    pub id: Uuid,
    /// The text content of the message (trimmed, non-empty).
    pub text: String,
    /// Who sent the message.
    pub sender: Sender,
    /// Timestamp when the message was created.
    pub timestamp: DateTime<Utc>,
    /// Delivery status; only present for user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
}

impl Message {
    /// Creates a new user message in the `Pending` state.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            status: Some(DeliveryStatus::Pending),
        }
    }

    /// Creates a new partner message (no delivery status).
    pub fn partner(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Partner,
            timestamp: Utc::now(),
            status: None,
        }
    }

    /// Returns a copy of this message with the given timestamp.
    ///
    /// Used when restoring a conversation whose messages predate "now".
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns a copy of this message with the given delivery status.
    pub fn with_status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_starts_pending() {
        let message = Message::user("hello");
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.status, Some(DeliveryStatus::Pending));
    }

    #[test]
    fn test_partner_message_has_no_status() {
        let message = Message::partner("hi!");
        assert_eq!(message.sender, Sender::Partner);
        assert_eq!(message.status, None);
    }

    #[test]
    fn test_messages_have_unique_ids() {
        let a = Message::user("one");
        let b = Message::user("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_is_omitted_from_json_when_absent() {
        let message = Message::partner("hi!");
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("status"));
    }
}
