// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use efg_core::{Event, MessageBuilder};

fn message(text: &str) -> GelfMessage {
    let event = Event {
        message: text.to_string(),
        ..Default::default()
    };
    MessageBuilder::new("fwd", "test").added(&event)
}

#[tokio::test]
async fn fake_sink_records_calls() {
    let sink = FakeSink::new();
    let mut owned = sink.clone();

    owned.write(&message("one")).await.unwrap();
    owned.write(&message("two")).await.unwrap();
    owned.close().await.unwrap();

    assert_eq!(sink.call_names(), vec!["Write", "Write", "Close"]);
    assert_eq!(sink.messages()[1].short_message, "two");
    assert_eq!(sink.close_count(), 1);
}

#[tokio::test]
async fn fake_sink_can_fail_writes() {
    let mut sink = FakeSink::new();
    sink.fail_writes("connection reset");

    let result = sink.write(&message("one")).await;
    match result {
        Err(SinkError::Rejected(msg)) => assert_eq!(msg, "connection reset"),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(sink.call_names(), vec!["Write"]);
}
