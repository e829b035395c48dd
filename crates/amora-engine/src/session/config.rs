//! Session configuration and the scripted opening conversation.

use std::time::Duration;

use chrono::{DateTime, Utc};

use amora_core::conversation::{DeliveryStatus, Message};

/// Tuning knobs for one [`Session`](super::Session).
///
/// Every delay is explicit so tests can shrink them; the defaults mirror the
/// product behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Display name of the scripted partner.
    pub partner_name: String,
    /// Delay between submission and delivery confirmation.
    pub delivery_delay: Duration,
    /// Further delay between delivery and the partner's reply.
    pub reply_delay: Duration,
    /// Delay before the check-in reminder fires; `None` disables it.
    pub check_in_delay: Option<Duration>,
    /// Interval at which notification elapsed time is advanced.
    pub notification_tick: Duration,
    /// Lifetime budget of notifications the session enqueues.
    pub notification_duration_ms: u64,
    /// Relationship level the session starts at.
    pub initial_relationship_level: u8,
    /// Whether to seed the log with the scripted opening conversation.
    pub seed_opening: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            partner_name: "Olivia".to_string(),
            delivery_delay: Duration::from_millis(800),
            reply_delay: Duration::from_millis(1500),
            check_in_delay: Some(Duration::from_secs(5)),
            notification_tick: Duration::from_millis(100),
            notification_duration_ms: 3000,
            initial_relationship_level: 35,
            seed_opening: true,
        }
    }
}

/// Returns the scripted opening conversation, anchored at `now`.
///
/// The user's line is already acknowledged; it belongs to a past exchange.
pub fn opening_script(now: DateTime<Utc>) -> Vec<Message> {
    let yesterday = now - chrono::Duration::hours(24);

    vec![
        Message::partner("Hi there! I'm your AI partner. How are you feeling today?")
            .at(yesterday),
        Message::user("I'm good, thanks for asking! Just a bit tired from work.")
            .with_status(DeliveryStatus::Acknowledged)
            .at(yesterday + chrono::Duration::minutes(5)),
        Message::partner(
            "I'm sorry to hear that. Work can be exhausting sometimes. \
             Is there anything I can help with to make your day better?",
        )
        .at(yesterday + chrono::Duration::minutes(10)),
        Message::partner(
            "Good morning! How did you sleep? I hope you're feeling refreshed today 😊",
        )
        .at(now),
    ]
}
