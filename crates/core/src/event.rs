// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster event records
//!
//! Mirrors the shape of the platform's `Event` object closely enough to
//! deserialize its JSON form. Missing keys default to empty values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle event reported by the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub metadata: ObjectMeta,
    pub involved_object: ObjectReference,
    pub reason: String,
    pub message: String,
    pub source: Reporter,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub count: i32,
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Identity and bookkeeping metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    pub resource_version: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

/// The object an event is about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: String,
    pub namespace: String,
    pub name: String,
    pub uid: String,
    pub api_version: String,
}

/// Component and host that reported the event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reporter {
    pub component: String,
    pub host: String,
}

/// Classification carried in an event's `type` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    Normal,
    Warning,
    /// Anything the platform did not document, including the empty string
    Other(String),
}

impl EventType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Normal" => EventType::Normal,
            "Warning" => EventType::Warning,
            other => EventType::Other(other.to_string()),
        }
    }
}

/// Namespace-qualified identity of an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl Event {
    pub fn key(&self) -> EventKey {
        EventKey {
            namespace: self.metadata.namespace.clone(),
            name: self.metadata.name.clone(),
        }
    }

    pub fn kind(&self) -> EventType {
        EventType::parse(&self.event_type)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.creation_timestamp
    }
}

/// An update notification: the previously cached record, if any, and its
/// replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePair {
    pub old: Option<Event>,
    pub new: Event,
}

impl UpdatePair {
    pub fn new(old: Option<Event>, new: Event) -> Self {
        Self { old, new }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
