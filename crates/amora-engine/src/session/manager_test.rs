use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use amora_core::conversation::{DeliveryStatus, Sender};
use amora_core::notification::NotificationKind;
use amora_core::reply::ReplyGenerator;

use super::config::SessionConfig;
use super::event::SessionEvent;
use super::manager::Session;

fn test_config() -> SessionConfig {
    SessionConfig {
        partner_name: "Olivia".to_string(),
        delivery_delay: Duration::from_millis(50),
        reply_delay: Duration::from_millis(100),
        check_in_delay: None,
        notification_tick: Duration::from_millis(10),
        notification_duration_ms: 3000,
        initial_relationship_level: 35,
        seed_opening: false,
    }
}

fn drain(receiver: &mut UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_submit_appends_pending_message_and_emits() {
    let (session, mut receiver) = Session::start(test_config());

    let message = session.submit_message("Hello").await.unwrap();
    assert_eq!(message.status, Some(DeliveryStatus::Pending));

    let messages = session.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "Hello");

    let events = drain(&mut receiver);
    assert!(matches!(
        events.as_slice(),
        [SessionEvent::MessagesChanged { messages }] if messages.len() == 1
    ));

    session.close().await;
}

#[tokio::test]
async fn test_whitespace_submission_is_rejected_without_side_effects() {
    let (session, mut receiver) = Session::start(test_config());

    let err = session.submit_message("   \n").await.unwrap_err();
    assert!(err.is_invalid_input());

    assert!(session.messages().await.is_empty());
    assert!(session.notifications().await.is_empty());
    assert!(drain(&mut receiver).is_empty());

    session.close().await;
}

#[tokio::test]
async fn test_delivery_then_reply_scenario() {
    let (session, mut receiver) = Session::start(test_config());

    let submitted = session.submit_message("Hello").await.unwrap();
    drain(&mut receiver);

    // Past the delivery delay, before the reply delay.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let messages = session.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, Some(DeliveryStatus::Delivered));

    let notifications = session.notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].message, "Message sent successfully");

    assert_eq!(session.relationship_level().await, 37);

    let events = drain(&mut receiver);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::NotificationsChanged { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::RelationshipChanged { level: 37 })));

    // Past the reply delay.
    tokio::time::sleep(Duration::from_millis(150)).await;

    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0].status,
        Some(DeliveryStatus::Acknowledged),
        "original message is acknowledged once the reply lands"
    );
    assert_eq!(messages[1].sender, Sender::Partner);
    assert_eq!(messages[1].text, ReplyGenerator::new().generate("Hello"));
    assert_eq!(messages[1].status, None);

    assert_eq!(
        session.messages().await[0].id,
        submitted.id,
        "the log is append-only"
    );

    session.close().await;
}

#[tokio::test]
async fn test_two_submissions_progress_independently() {
    let (session, _receiver) = Session::start(test_config());

    session.submit_message("Hello").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    session.submit_message("xyzzy").await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    let messages = session.messages().await;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].status, Some(DeliveryStatus::Acknowledged));
    assert_eq!(messages[1].status, Some(DeliveryStatus::Acknowledged));
    assert_eq!(messages[2].text, ReplyGenerator::new().generate("Hello"));
    assert_eq!(messages[3].text, ReplyGenerator::new().generate("xyzzy"));

    assert_eq!(session.relationship_level().await, 39);
    assert_eq!(session.notifications().await.len(), 2);

    session.close().await;
}

#[tokio::test]
async fn test_close_cancels_pending_timers() {
    let (session, mut receiver) = Session::start(test_config());

    session.submit_message("Hello").await.unwrap();
    session.close().await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    let messages = session.messages().await;
    assert_eq!(
        messages[0].status,
        Some(DeliveryStatus::Pending),
        "no transition may fire on a closed session"
    );
    assert_eq!(messages.len(), 1, "no reply may be appended");
    assert!(session.notifications().await.is_empty());

    let events = drain(&mut receiver);
    assert!(
        events
            .iter()
            .all(|e| matches!(e, SessionEvent::MessagesChanged { .. })),
        "only the submission event itself was emitted"
    );
}

#[tokio::test]
async fn test_submit_after_close_fails() {
    let (session, _receiver) = Session::start(test_config());

    session.close().await;
    let err = session.submit_message("Hello").await.unwrap_err();

    assert!(err.is_invalid_state());
    assert!(session.messages().await.is_empty());
}

#[tokio::test]
async fn test_notification_expires_through_ticker() {
    let mut config = test_config();
    config.notification_duration_ms = 40;
    let (session, mut receiver) = Session::start(config);

    session.begin_check_in().await;
    assert_eq!(session.notifications().await.len(), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(session.notifications().await.is_empty());
    let events = drain(&mut receiver);
    assert!(matches!(
        events.last(),
        Some(SessionEvent::NotificationsChanged { notifications }) if notifications.is_empty()
    ));

    session.close().await;
}

#[tokio::test]
async fn test_dismiss_removes_notification_before_expiry() {
    let (session, mut receiver) = Session::start(test_config());

    session.begin_check_in().await;
    let id = session.notifications().await[0].id;
    drain(&mut receiver);

    session.dismiss_notification(id).await;
    assert!(session.notifications().await.is_empty());
    assert_eq!(drain(&mut receiver).len(), 1);

    // Dismissing again is a silent no-op.
    session.dismiss_notification(id).await;
    assert!(drain(&mut receiver).is_empty());

    session.close().await;
}

#[tokio::test]
async fn test_paused_notification_outlives_its_duration() {
    let mut config = test_config();
    config.notification_duration_ms = 100;
    let (session, _receiver) = Session::start(config);

    session.begin_check_in().await;
    let id = session.notifications().await[0].id;
    session.pause_notification(id).await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        session.notifications().await.len(),
        1,
        "a paused entry never expires"
    );

    session.resume_notification(id).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(session.notifications().await.is_empty());

    session.close().await;
}

#[tokio::test]
async fn test_check_in_due_fires_after_configured_delay() {
    let mut config = test_config();
    config.check_in_delay = Some(Duration::from_millis(30));
    let (session, mut receiver) = Session::start(config);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let events = drain(&mut receiver);
    assert!(matches!(
        events.as_slice(),
        [SessionEvent::CheckInDue { partner_name }] if partner_name == "Olivia"
    ));

    session.begin_check_in().await;
    let notifications = session.notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Info);
    assert_eq!(notifications[0].message, "Starting conversation with Olivia");

    session.close().await;
}

#[tokio::test]
async fn test_opening_script_seeds_history() {
    let mut config = test_config();
    config.seed_opening = true;
    let (session, _receiver) = Session::start(config);

    let messages = session.messages().await;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].status, Some(DeliveryStatus::Acknowledged));

    let buckets = session.grouped_messages().await;
    assert_eq!(buckets.len(), 2, "opening spans yesterday and today");
    assert_eq!(
        buckets.iter().map(|b| b.messages.len()).sum::<usize>(),
        4
    );
    assert!(buckets[0].date < buckets[1].date);

    session.close().await;
}
