//! Append-only conversation log and message lifecycle transitions.

use uuid::Uuid;

use super::message::{DeliveryStatus, Message, Sender};
use crate::error::{AmoraError, Result};

/// The ordered, append-only sequence of messages in one conversation.
///
/// `ConversationLog` is responsible for:
/// - Appending user submissions and partner replies
/// - Advancing the delivery status of user messages
/// - Guarding the monotone `Pending` → `Delivered` → `Acknowledged` order
///
/// Messages are never reordered or removed for the lifetime of the log.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Creates a new, empty conversation log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from prior history, preserving order and statuses.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Appends a new user message in the `Pending` state.
    ///
    /// The input is trimmed before validation; whitespace-only input is
    /// rejected and nothing is appended.
    ///
    /// # Errors
    ///
    /// Returns [`AmoraError::InvalidInput`] if the trimmed text is empty.
    pub fn submit(&mut self, text: &str) -> Result<Message> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AmoraError::invalid_input(
                "message text must not be empty",
            ));
        }

        let message = Message::user(trimmed);
        self.messages.push(message.clone());
        Ok(message)
    }

    /// Appends a partner reply (no delivery status).
    pub fn append_reply(&mut self, text: impl Into<String>) -> Message {
        let message = Message::partner(text);
        self.messages.push(message.clone());
        message
    }

    /// Transitions a user message from `Pending` to `Delivered`.
    ///
    /// # Errors
    ///
    /// Returns [`AmoraError::InvalidState`] if the message does not exist or
    /// is not currently `Pending`. No mutation happens on error.
    pub fn mark_delivered(&mut self, id: Uuid) -> Result<()> {
        self.transition(id, DeliveryStatus::Pending, DeliveryStatus::Delivered)
    }

    /// Transitions a user message from `Delivered` to `Acknowledged`.
    ///
    /// # Errors
    ///
    /// Returns [`AmoraError::InvalidState`] if the message does not exist or
    /// is not currently `Delivered`. No mutation happens on error.
    pub fn mark_acknowledged(&mut self, id: Uuid) -> Result<()> {
        self.transition(
            id,
            DeliveryStatus::Delivered,
            DeliveryStatus::Acknowledged,
        )
    }

    fn transition(
        &mut self,
        id: Uuid,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| {
                AmoraError::invalid_state(format!("message '{id}' does not exist"))
            })?;

        if message.sender != Sender::User || message.status != Some(from) {
            return Err(AmoraError::invalid_state(format!(
                "message '{id}' is not in the {from:?} state"
            )));
        }

        message.status = Some(to);
        Ok(())
    }

    /// Returns the full ordered message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Looks up a message by id.
    pub fn get(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
