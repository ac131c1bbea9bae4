// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

const POD_EVENT: &str = r#"{
    "apiVersion": "v1",
    "kind": "Event",
    "metadata": {
        "name": "web-7d9f.17a1b2c3",
        "namespace": "shop",
        "uid": "1f2e3d4c",
        "resourceVersion": "4242",
        "creationTimestamp": "2024-03-01T12:00:00Z"
    },
    "involvedObject": {
        "kind": "Pod",
        "namespace": "shop",
        "name": "web-7d9f",
        "apiVersion": "v1"
    },
    "reason": "BackOff",
    "message": "Back-off restarting failed container",
    "source": { "component": "kubelet", "host": "node-3" },
    "firstTimestamp": "2024-03-01T12:00:00Z",
    "lastTimestamp": "2024-03-01T12:00:07Z",
    "count": 3,
    "type": "Warning"
}"#;

#[test]
fn deserializes_platform_json() {
    let event: Event = serde_json::from_str(POD_EVENT).unwrap();

    assert_eq!(event.metadata.name, "web-7d9f.17a1b2c3");
    assert_eq!(event.metadata.namespace, "shop");
    assert_eq!(event.metadata.resource_version, "4242");
    assert_eq!(
        event.created_at(),
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    );
    assert_eq!(
        event.last_timestamp,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 7).unwrap())
    );
    assert_eq!(event.involved_object.kind, "Pod");
    assert_eq!(event.involved_object.name, "web-7d9f");
    assert_eq!(event.source.component, "kubelet");
    assert_eq!(event.source.host, "node-3");
    assert_eq!(event.reason, "BackOff");
    assert_eq!(event.count, 3);
    assert_eq!(event.kind(), EventType::Warning);
}

#[test]
fn missing_fields_default_to_empty() {
    let event: Event = serde_json::from_str(r#"{"metadata":{"name":"x"}}"#).unwrap();

    assert_eq!(event.metadata.name, "x");
    assert_eq!(event.message, "");
    assert_eq!(event.count, 0);
    assert!(event.created_at().is_none());
    assert!(event.last_timestamp.is_none());
    assert_eq!(event.kind(), EventType::Other(String::new()));
}

#[test]
fn key_displays_namespace_and_name() {
    let event: Event = serde_json::from_str(POD_EVENT).unwrap();
    assert_eq!(event.key().to_string(), "shop/web-7d9f.17a1b2c3");
}

#[test]
fn event_type_parse_is_case_sensitive() {
    assert_eq!(EventType::parse("Normal"), EventType::Normal);
    assert_eq!(EventType::parse("Warning"), EventType::Warning);
    assert_eq!(
        EventType::parse("warning"),
        EventType::Other("warning".to_string())
    );
}
