// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! efg-daemon: process wiring for event-forwarder-gelf
//!
//! Parses configuration, resolves the reporting host, connects the Graylog
//! sink and runs the router against the configured event feed.

pub mod config;
pub mod fqdn;
pub mod lifecycle;

pub use config::{Config, FeedLocation};
pub use fqdn::{qualify, resolve_fqdn, HostError};
pub use lifecycle::{install_signal_handler, startup, Feed, Forwarder, LifecycleError};
