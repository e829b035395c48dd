//! Date-based grouping of the conversation log.
//!
//! Grouping is a pure query over the message sequence: it is recomputed on
//! demand and never stored, so repeated invocations over the same input
//! always yield the same buckets.

use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashMap;

use super::message::Message;

/// A date-keyed, order-preserving partition of the message sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket {
    /// Local calendar date shared by every message in the bucket.
    pub date: NaiveDate,
    /// Messages for that date, in original relative order.
    pub messages: Vec<Message>,
}

/// Partitions messages into buckets keyed by their local calendar date.
///
/// Buckets are enumerated in the order their dates first appear in the
/// input; a later message revisiting an earlier date is appended to the
/// existing bucket without moving it.
pub fn group_by_date(messages: &[Message]) -> Vec<DateBucket> {
    let mut buckets: Vec<DateBucket> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for message in messages {
        let date = local_date(message);
        match index_by_date.get(&date) {
            Some(&i) => buckets[i].messages.push(message.clone()),
            None => {
                index_by_date.insert(date, buckets.len());
                buckets.push(DateBucket {
                    date,
                    messages: vec![message.clone()],
                });
            }
        }
    }

    buckets
}

/// Returns the human-readable label for a bucket date.
///
/// "Today" and "Yesterday" for the obvious cases, otherwise a short
/// month-day string; the year is appended only when it differs from the
/// current one.
pub fn date_label(date: NaiveDate) -> String {
    date_label_from(date, Local::now().date_naive())
}

/// Same as [`date_label`], with "today" fixed by the caller.
pub fn date_label_from(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if Some(date) == today.pred_opt() {
        return "Yesterday".to_string();
    }
    if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Returns true when the message at `index` ends a run of consecutive
/// messages from the same sender within its bucket.
///
/// The presentation layer uses this to decide where an avatar or sender
/// marker belongs. Out-of-range indices are never run terminals.
pub fn ends_sender_run(messages: &[Message], index: usize) -> bool {
    if index >= messages.len() {
        return false;
    }
    match messages.get(index + 1) {
        Some(next) => messages[index].sender != next.sender,
        None => true,
    }
}

fn local_date(message: &Message) -> NaiveDate {
    message.timestamp.with_timezone(&Local).date_naive()
}
