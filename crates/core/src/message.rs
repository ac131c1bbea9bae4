// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized log messages built from cluster events

use crate::event::Event;
use crate::filter::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version stamped on every message
pub const GELF_VERSION: &str = "0.1";

/// A structured log message in GELF layout.
///
/// Additional fields serialize as `_`-prefixed top-level keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GelfMessage {
    pub version: String,
    pub host: String,
    pub short_message: String,
    pub timestamp: f64,
    pub level: u8,
    #[serde(flatten)]
    pub extra: EventFields,
}

/// The fixed set of event attributes carried alongside each message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    #[serde(rename = "_cluster")]
    pub cluster: String,
    #[serde(rename = "_component")]
    pub component: String,
    #[serde(rename = "_event_name")]
    pub event_name: String,
    #[serde(rename = "_host_name")]
    pub host_name: String,
    #[serde(rename = "_kind")]
    pub kind: String,
    #[serde(rename = "_namespace_name")]
    pub namespace_name: String,
    #[serde(rename = "_pod_name")]
    pub pod_name: String,
    #[serde(rename = "_event_type")]
    pub event_type: String,
    #[serde(rename = "_event_reason")]
    pub event_reason: String,
}

/// Builds messages for one forwarder instance
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    host: String,
    cluster: String,
}

impl MessageBuilder {
    /// `host` is the forwarder's own host name, not the event's reporter
    pub fn new(host: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            cluster: cluster.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Build a message stamped with `timestamp`
    pub fn build(&self, event: &Event, timestamp: DateTime<Utc>) -> GelfMessage {
        GelfMessage {
            version: GELF_VERSION.to_string(),
            host: self.host.clone(),
            short_message: event.message.clone(),
            timestamp: unix_seconds(timestamp),
            level: Severity::for_event(event).code(),
            extra: EventFields {
                cluster: self.cluster.clone(),
                component: event.source.component.clone(),
                event_name: event.metadata.name.clone(),
                host_name: event.source.host.clone(),
                kind: event.involved_object.kind.clone(),
                namespace_name: event.involved_object.namespace.clone(),
                pod_name: event.involved_object.name.clone(),
                event_type: event.event_type.clone(),
                event_reason: event.reason.clone(),
            },
        }
    }

    /// Message for a newly added event, stamped with its creation time
    pub fn added(&self, event: &Event) -> GelfMessage {
        self.build(event, event.created_at().unwrap_or_default())
    }

    /// Message for an updated event, stamped with its last-seen time
    pub fn updated(&self, event: &Event) -> GelfMessage {
        let stamp = event
            .last_timestamp
            .or_else(|| event.created_at())
            .unwrap_or_default();
        self.build(event, stamp)
    }
}

fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
