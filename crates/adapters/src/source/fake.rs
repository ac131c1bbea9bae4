// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake event source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CancelSignal, EventHandlers, EventSource, Notification, SourceError, SourceExit};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the fake does once its script is delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfterScript {
    /// Stay subscribed until cancelled, like a live watch
    #[default]
    WaitForCancel,
    /// Return immediately, like a feed reaching end of input
    Exhaust,
}

/// Event source replaying a fixed list of notifications
#[derive(Clone, Default)]
pub struct FakeEventSource {
    script: Vec<Notification>,
    after: AfterScript,
    cancelled: Arc<AtomicBool>,
}

impl FakeEventSource {
    pub fn new(script: Vec<Notification>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn then(mut self, after: AfterScript) -> Self {
        self.after = after;
        self
    }

    /// Whether the source observed cancellation
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn run(
        self,
        handlers: EventHandlers,
        mut cancel: CancelSignal,
    ) -> Result<SourceExit, SourceError> {
        for notification in self.script {
            if !handlers.deliver(notification, &mut cancel).await {
                self.cancelled.store(true, Ordering::SeqCst);
                return Ok(SourceExit::Cancelled);
            }
        }

        match self.after {
            AfterScript::Exhaust => Ok(SourceExit::Exhausted),
            AfterScript::WaitForCancel => {
                cancel.cancelled().await;
                self.cancelled.store(true, Ordering::SeqCst);
                Ok(SourceExit::Cancelled)
            }
        }
    }
}
