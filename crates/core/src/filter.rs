// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarding policy for cluster events
//!
//! On startup the cluster replays its retained event history (up to a day
//! of it). Anything created outside a short window is treated as backlog or
//! a duplicate and dropped.

use crate::event::{Event, EventType, UpdatePair};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Events created longer ago than this many seconds are never forwarded
pub const LOGGABLE_WINDOW_SECS: i64 = 5;

/// Whether an event is fresh enough to forward.
///
/// Events without a creation timestamp are never loggable.
pub fn is_loggable(event: &Event, now: DateTime<Utc>) -> bool {
    match event.created_at() {
        Some(created) => created + TimeDelta::seconds(LOGGABLE_WINDOW_SECS) > now,
        None => false,
    }
}

/// Why an update notification was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// No prior state was cached for the event
    NoPriorState,
    /// The event was created outside the loggable window
    Stale,
    /// Old and new records are identical
    Unchanged,
    /// The occurrence count did not increase
    CountNotIncreased,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DiscardReason::NoPriorState => "no prior state",
            DiscardReason::Stale => "stale",
            DiscardReason::Unchanged => "unchanged",
            DiscardReason::CountNotIncreased => "count not increased",
        };
        f.write_str(text)
    }
}

/// Outcome of evaluating a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Forward,
    Discard(DiscardReason),
}

impl Decision {
    pub fn is_forward(&self) -> bool {
        matches!(self, Decision::Forward)
    }
}

/// Evaluate an add notification
pub fn evaluate_add(event: &Event, now: DateTime<Utc>) -> Decision {
    if is_loggable(event, now) {
        Decision::Forward
    } else {
        Decision::Discard(DiscardReason::Stale)
    }
}

/// Evaluate an update notification.
///
/// Equality is structural over the whole record, bookkeeping metadata
/// included, so an update touching only the resource version still counts
/// as a change here and is then judged by its count.
pub fn evaluate_update(pair: &UpdatePair, now: DateTime<Utc>) -> Decision {
    let Some(old) = pair.old.as_ref() else {
        return Decision::Discard(DiscardReason::NoPriorState);
    };
    if !is_loggable(&pair.new, now) {
        return Decision::Discard(DiscardReason::Stale);
    }
    if *old == pair.new {
        return Decision::Discard(DiscardReason::Unchanged);
    }
    if old.count >= pair.new.count {
        return Decision::Discard(DiscardReason::CountNotIncreased);
    }
    Decision::Forward
}

/// Whether an update pair is worth forwarding
pub fn should_forward_update(pair: &UpdatePair, now: DateTime<Utc>) -> bool {
    evaluate_update(pair, now).is_forward()
}

/// Log severity of a forwarded event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn for_event(event: &Event) -> Self {
        match event.kind() {
            EventType::Normal => Severity::Info,
            EventType::Warning => Severity::Warning,
            // Unclassified events are surfaced loudly rather than dropped
            EventType::Other(_) => Severity::Error,
        }
    }

    /// Syslog-style level code used on the wire
    pub fn code(self) -> u8 {
        match self {
            Severity::Info => 6,
            Severity::Warning => 4,
            Severity::Error => 3,
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
