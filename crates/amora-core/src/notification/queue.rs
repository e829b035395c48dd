//! Timed notification queue.

use uuid::Uuid;

use super::model::{
    NotificationEntry, NotificationKind, NotificationRemoval, RemovalReason,
};

/// An insertion-ordered set of independently-timed notification entries.
///
/// Each entry accrues elapsed time through explicit [`tick`](Self::tick)
/// calls while not paused, and is removed exactly once: either when its
/// elapsed time reaches its duration (`Expired`) or when the consumer
/// removes it early (`Dismissed`). Entries are fully independent; pausing
/// one never affects another's accrual.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<NotificationEntry>,
}

impl NotificationQueue {
    /// Creates a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new entry and returns its id. Always succeeds.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: Option<u64>,
    ) -> Uuid {
        let entry = NotificationEntry::new(message, kind, duration_ms);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Freezes an entry's elapsed-time accrual.
    ///
    /// An unknown id (e.g. an already-removed entry) is an idempotent no-op.
    pub fn pause(&mut self, id: Uuid) {
        if let Some(entry) = self.entry_mut(id) {
            entry.paused = true;
        }
    }

    /// Resumes an entry's elapsed-time accrual. Unknown ids are a no-op.
    pub fn resume(&mut self, id: Uuid) {
        if let Some(entry) = self.entry_mut(id) {
            entry.paused = false;
        }
    }

    /// Advances one entry's elapsed time by `delta_ms` if it is not paused.
    ///
    /// When the elapsed time reaches the entry's duration, the entry is
    /// removed and the `Expired` removal is returned; this fires exactly
    /// once per entry. Ticks against paused or unknown entries return
    /// `None`.
    pub fn tick(&mut self, id: Uuid, delta_ms: u64) -> Option<NotificationRemoval> {
        let entry = self.entry_mut(id)?;
        if entry.paused {
            return None;
        }

        entry.elapsed_ms = entry
            .elapsed_ms
            .saturating_add(delta_ms)
            .min(entry.duration_ms);

        if entry.elapsed_ms >= entry.duration_ms {
            self.entries.retain(|e| e.id != id);
            return Some(NotificationRemoval {
                id,
                reason: RemovalReason::Expired,
            });
        }
        None
    }

    /// Advances every entry by the same `delta_ms`, returning the removals
    /// in queue order. Paused entries are unaffected.
    pub fn tick_all(&mut self, delta_ms: u64) -> Vec<NotificationRemoval> {
        let ids: Vec<Uuid> = self.entries.iter().map(|e| e.id).collect();
        ids.into_iter()
            .filter_map(|id| self.tick(id, delta_ms))
            .collect()
    }

    /// Removes an entry immediately, regardless of elapsed time.
    ///
    /// Returns the `Dismissed` removal, or `None` for unknown ids; later
    /// ticks for a dismissed id have no effect.
    pub fn dismiss(&mut self, id: Uuid) -> Option<NotificationRemoval> {
        let exists = self.entries.iter().any(|e| e.id == id);
        if !exists {
            return None;
        }
        self.entries.retain(|e| e.id != id);
        Some(NotificationRemoval {
            id,
            reason: RemovalReason::Dismissed,
        })
    }

    /// The active entries, in insertion order.
    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    /// Looks up an active entry by id.
    pub fn get(&self, id: Uuid) -> Option<&NotificationEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: Uuid) -> Option<&mut NotificationEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}
