// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! efg-core: event model and forwarding policy for event-forwarder-gelf
//!
//! This crate provides:
//! - Cluster event records and update pairs
//! - The pure forwarding policy (freshness, dedup, severity)
//! - GELF message construction
//! - A rendezvous hand-off channel used to feed the router

pub mod clock;
pub mod event;
pub mod filter;
pub mod handoff;
pub mod message;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{Event, EventKey, EventType, ObjectMeta, ObjectReference, Reporter, UpdatePair};
pub use filter::{
    evaluate_add, evaluate_update, is_loggable, should_forward_update, Decision, DiscardReason,
    Severity, LOGGABLE_WINDOW_SECS,
};
pub use handoff::{handoff, HandoffClosed, HandoffReceiver, HandoffSender};
pub use message::{EventFields, GelfMessage, MessageBuilder, GELF_VERSION};
