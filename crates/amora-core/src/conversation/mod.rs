//! Conversation domain module.
//!
//! This module contains the message model, the append-only conversation log
//! with its delivery-status lifecycle, and the date-grouping queries.
//!
//! # Module Structure
//!
//! - `message`: Message types (`Sender`, `DeliveryStatus`, `Message`)
//! - `log`: Append-only log and status transitions (`ConversationLog`)
//! - `grouping`: Date-bucketing queries (`DateBucket`, `group_by_date`)

mod grouping;
mod log;
mod message;

// Re-export public API
pub use grouping::{DateBucket, date_label, date_label_from, ends_sender_run, group_by_date};
pub use log::ConversationLog;
pub use message::{DeliveryStatus, Message, Sender};
