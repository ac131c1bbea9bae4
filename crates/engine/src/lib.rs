// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Event evaluation and dispatch for event-forwarder-gelf

mod router;
mod shutdown;

pub use router::{EventRouter, RouterDeps, RouterHandles, RouterState, RouterStats};
pub use shutdown::{ShutdownCoordinator, ShutdownReport, StopHandle, StopReason};
