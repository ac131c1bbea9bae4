// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use efg_core::ObjectMeta;
use std::time::Duration;

fn event(name: &str, count: i32) -> Event {
    Event {
        metadata: ObjectMeta {
            name: name.to_string(),
            namespace: "default".to_string(),
            ..Default::default()
        },
        count,
        ..Default::default()
    }
}

#[tokio::test]
async fn handlers_deliver_to_matching_channels() {
    let (handlers, mut notifications) = notification_channels();
    let (_canceller, mut cancel) = cancellation();

    let producer = tokio::spawn(async move {
        assert!(
            handlers
                .deliver(Notification::Added(event("a", 1)), &mut cancel)
                .await
        );
        assert!(handlers.on_update(Some(event("a", 1)), event("a", 2)).await);
    });

    let added = notifications.added.recv().await.unwrap();
    assert_eq!(added.metadata.name, "a");

    let pair = notifications.updated.recv().await.unwrap();
    assert_eq!(pair.old.map(|e| e.count), Some(1));
    assert_eq!(pair.new.count, 2);

    producer.await.unwrap();
}

#[tokio::test]
async fn deliver_gives_up_when_cancelled() {
    let (handlers, _notifications) = notification_channels();
    let (canceller, mut cancel) = cancellation();

    let producer = tokio::spawn(async move {
        handlers
            .deliver(Notification::Added(event("a", 1)), &mut cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    canceller.cancel();

    assert!(!producer.await.unwrap());
}

#[tokio::test]
async fn on_add_reports_router_gone() {
    let (handlers, notifications) = notification_channels();
    drop(notifications);
    assert!(!handlers.on_add(event("a", 1)).await);
}

#[tokio::test]
async fn cancel_signal_observes_trigger() {
    let (canceller, mut cancel) = cancellation();
    assert!(!cancel.is_cancelled());

    canceller.cancel();
    assert!(cancel.is_cancelled());
    // Resolves immediately once set
    cancel.cancelled().await;
}

#[tokio::test]
async fn cancel_signal_resolves_when_trigger_dropped() {
    let (canceller, mut cancel) = cancellation();
    drop(canceller);
    tokio::time::timeout(Duration::from_secs(1), cancel.cancelled())
        .await
        .unwrap();
}

#[tokio::test]
async fn fake_source_replays_script_then_waits_for_cancel() {
    let source = FakeEventSource::new(vec![
        Notification::Added(event("a", 1)),
        Notification::Updated(UpdatePair::new(Some(event("a", 1)), event("a", 2))),
    ]);
    let probe = source.clone();
    let (handlers, mut notifications) = notification_channels();
    let (canceller, cancel) = cancellation();

    let task = tokio::spawn(source.run(handlers, cancel));

    assert_eq!(notifications.added.recv().await.unwrap().count, 1);
    assert_eq!(notifications.updated.recv().await.unwrap().new.count, 2);

    canceller.cancel();
    assert_eq!(task.await.unwrap().unwrap(), SourceExit::Cancelled);
    assert!(probe.was_cancelled());
}

#[tokio::test]
async fn fake_source_can_exhaust() {
    let source = FakeEventSource::new(vec![]).then(AfterScript::Exhaust);
    let (handlers, _notifications) = notification_channels();
    let (_canceller, cancel) = cancellation();

    let exit = source.run(handlers, cancel).await.unwrap();
    assert_eq!(exit, SourceExit::Exhausted);
}
