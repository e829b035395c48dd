use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use amora_core::conversation::{
    ConversationLog, DateBucket, DeliveryStatus, Message, group_by_date,
};
use amora_core::error::{AmoraError, Result};
use amora_core::notification::{NotificationEntry, NotificationKind, NotificationQueue};
use amora_core::relationship::RelationshipMeter;
use amora_core::reply::ReplyGenerator;

use super::config::{SessionConfig, opening_script};
use super::event::SessionEvent;

/// Mutable state of one conversation, guarded by a single lock.
struct SessionState {
    log: ConversationLog,
    notifications: NotificationQueue,
    relationship: RelationshipMeter,
    generator: ReplyGenerator,
    closed: bool,
}

/// The two deferred actions scheduled for one submitted message.
///
/// Delivery and reply are independent timers, not a chain, so teardown can
/// cancel either without the other having fired.
struct MessageTimers {
    delivery: JoinHandle<()>,
    reply: JoinHandle<()>,
}

/// Composition root for one active conversation.
///
/// `Session` is responsible for:
/// - Appending user submissions and scheduling their delivery/reply timers
/// - Advancing notification lifetimes on a fixed tick
/// - Emitting [`SessionEvent`]s to the presentation layer
/// - Cancelling every outstanding timer on [`close`](Self::close) or drop
///
/// All state transitions happen under one `RwLock`; timer callbacks that
/// find the session closed, or their message no longer in the expected
/// state, are silent no-ops.
pub struct Session {
    config: SessionConfig,
    state: Arc<RwLock<SessionState>>,
    timers: Arc<Mutex<HashMap<Uuid, MessageTimers>>>,
    background: Mutex<Vec<JoinHandle<()>>>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
    /// Starts a session and returns it together with the event stream the
    /// presentation layer should consume.
    ///
    /// Must be called within a tokio runtime; the session spawns its
    /// notification ticker (and check-in timer, when configured) here.
    pub fn start(config: SessionConfig) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let log = if config.seed_opening {
            ConversationLog::from_messages(opening_script(chrono::Utc::now()))
        } else {
            ConversationLog::new()
        };

        let state = Arc::new(RwLock::new(SessionState {
            log,
            notifications: NotificationQueue::new(),
            relationship: RelationshipMeter::new(config.initial_relationship_level),
            generator: ReplyGenerator::new(),
            closed: false,
        }));

        let session = Self {
            config,
            state,
            timers: Arc::new(Mutex::new(HashMap::new())),
            background: Mutex::new(Vec::new()),
            events,
        };

        session.spawn_notification_ticker();
        session.spawn_check_in_timer();

        tracing::debug!(
            "[Session] Started session with partner '{}'",
            session.config.partner_name
        );

        (session, receiver)
    }

    /// Appends a user message and schedules its delivery and reply timers.
    ///
    /// Validation is synchronous: rejected input leaves the log, the
    /// notification set, and the timer map untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AmoraError::InvalidInput`] for whitespace-only text and
    /// [`AmoraError::InvalidState`] once the session is closed.
    pub async fn submit_message(&self, text: &str) -> Result<Message> {
        let message = {
            let mut state = self.state.write().await;
            if state.closed {
                return Err(AmoraError::invalid_state("session is closed"));
            }

            let message = state.log.submit(text)?;
            self.emit(SessionEvent::MessagesChanged {
                messages: state.log.messages().to_vec(),
            });
            message
        };

        self.schedule_message_timers(message.id, message.text.clone());
        Ok(message)
    }

    /// Removes a notification immediately. Unknown ids are a no-op.
    pub async fn dismiss_notification(&self, id: Uuid) {
        let mut state = self.state.write().await;
        if state.notifications.dismiss(id).is_some() {
            self.emit(SessionEvent::NotificationsChanged {
                notifications: state.notifications.entries().to_vec(),
            });
        }
    }

    /// Freezes a notification's lifetime accrual. Unknown ids are a no-op.
    pub async fn pause_notification(&self, id: Uuid) {
        self.state.write().await.notifications.pause(id);
    }

    /// Resumes a notification's lifetime accrual. Unknown ids are a no-op.
    pub async fn resume_notification(&self, id: Uuid) {
        self.state.write().await.notifications.resume(id);
    }

    /// Accepts the check-in reminder and enqueues the matching notification.
    pub async fn begin_check_in(&self) {
        let mut state = self.state.write().await;
        if state.closed {
            return;
        }

        state.notifications.enqueue(
            format!("Starting conversation with {}", self.config.partner_name),
            NotificationKind::Info,
            Some(self.config.notification_duration_ms),
        );
        self.emit(SessionEvent::NotificationsChanged {
            notifications: state.notifications.entries().to_vec(),
        });
    }

    /// The full ordered message sequence.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.log.messages().to_vec()
    }

    /// The message sequence partitioned into date buckets, computed on read.
    pub async fn grouped_messages(&self) -> Vec<DateBucket> {
        group_by_date(self.state.read().await.log.messages())
    }

    /// The active notification entries, in insertion order.
    pub async fn notifications(&self) -> Vec<NotificationEntry> {
        self.state.read().await.notifications.entries().to_vec()
    }

    /// The current relationship level.
    pub async fn relationship_level(&self) -> u8 {
        self.state.read().await.relationship.level()
    }

    /// Marks the session closed and cancels every outstanding timer.
    ///
    /// Idempotent; a closed session rejects submissions and lets scheduled
    /// callbacks die silently.
    pub async fn close(&self) {
        {
            let mut state = self.state.write().await;
            if state.closed {
                return;
            }
            state.closed = true;
        }
        self.abort_all();
        tracing::debug!("[Session] Closed, all timers cancelled");
    }

    /// Schedules the two independent deferred actions for one message.
    fn schedule_message_timers(&self, id: Uuid, text: String) {
        let duration_ms = self.config.notification_duration_ms;

        let delivery = {
            let state = Arc::clone(&self.state);
            let events = self.events.clone();
            let delay = self.config.delivery_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;

                let mut state = state.write().await;
                if state.closed {
                    return;
                }
                match state.log.mark_delivered(id) {
                    Ok(()) => {
                        let level = state.relationship.record_delivery();
                        state.notifications.enqueue(
                            "Message sent successfully",
                            NotificationKind::Success,
                            Some(duration_ms),
                        );
                        let _ = events.send(SessionEvent::MessagesChanged {
                            messages: state.log.messages().to_vec(),
                        });
                        let _ = events.send(SessionEvent::NotificationsChanged {
                            notifications: state.notifications.entries().to_vec(),
                        });
                        let _ = events.send(SessionEvent::RelationshipChanged { level });
                    }
                    Err(e) => {
                        tracing::debug!(
                            "[Session] Delivery timer fired for stale message {id}: {e}"
                        );
                    }
                }
            })
        };

        let reply = {
            let state = Arc::clone(&self.state);
            let timers = Arc::clone(&self.timers);
            let events = self.events.clone();
            let delay = self.config.delivery_delay + self.config.reply_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;

                {
                    let mut state = state.write().await;
                    if state.closed {
                        return;
                    }

                    // Delivery is a prerequisite for replying.
                    let delivered = state
                        .log
                        .get(id)
                        .is_some_and(|m| m.status == Some(DeliveryStatus::Delivered));
                    if !delivered {
                        tracing::debug!(
                            "[Session] Reply timer fired for undelivered message {id}"
                        );
                    } else {
                        let reply_text = state.generator.generate(&text).to_string();
                        state.log.append_reply(reply_text);
                        if let Err(e) = state.log.mark_acknowledged(id) {
                            tracing::debug!(
                                "[Session] Could not acknowledge message {id}: {e}"
                            );
                        }
                        let _ = events.send(SessionEvent::MessagesChanged {
                            messages: state.log.messages().to_vec(),
                        });
                    }
                }

                // Both timers for this message are spent.
                timers.lock().unwrap().remove(&id);
            })
        };

        self.timers
            .lock()
            .unwrap()
            .insert(id, MessageTimers { delivery, reply });
    }

    fn spawn_notification_ticker(&self) {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let tick = self.config.notification_tick;
        let delta_ms = tick.as_millis() as u64;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // The first tick completes immediately; skip it so no elapsed
            // time is credited at t=0.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let mut state = state.write().await;
                if state.closed {
                    break;
                }
                let removals = state.notifications.tick_all(delta_ms);
                if !removals.is_empty() {
                    let _ = events.send(SessionEvent::NotificationsChanged {
                        notifications: state.notifications.entries().to_vec(),
                    });
                }
            }
        });

        self.background.lock().unwrap().push(handle);
    }

    fn spawn_check_in_timer(&self) {
        let Some(delay) = self.config.check_in_delay else {
            return;
        };

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let partner_name = self.config.partner_name.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if state.read().await.closed {
                return;
            }
            let _ = events.send(SessionEvent::CheckInDue { partner_name });
        });

        self.background.lock().unwrap().push(handle);
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    fn abort_all(&self) {
        let mut timers = self.timers.lock().unwrap();
        for (_, timer) in timers.drain() {
            timer.delivery.abort();
            timer.reply.abort();
        }
        drop(timers);

        let mut background = self.background.lock().unwrap();
        for handle in background.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // A discarded session must not leave timers mutating freed state.
        self.abort_all();
    }
}
