// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event source adapters
//!
//! A source delivers add and update notifications through [`EventHandlers`].
//! Each delivery is a rendezvous: it completes only once the router has
//! taken the notification, so a source can never outrun the router.

mod json_lines;

pub use json_lines::JsonLinesSource;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AfterScript, FakeEventSource};

use async_trait::async_trait;
use efg_core::{handoff, Event, HandoffReceiver, HandoffSender, UpdatePair};
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::watch;

/// Errors from event sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open event feed {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read event feed: {0}")]
    Read(#[from] std::io::Error),
}

/// Why a source stopped delivering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceExit {
    /// Cancellation was requested, or the router went away
    Cancelled,
    /// The underlying feed ended
    Exhausted,
}

/// A single notification from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Added(Event),
    Updated(UpdatePair),
}

/// Subscription to cluster events
#[async_trait]
pub trait EventSource: Send + Sized + 'static {
    /// Deliver notifications until the feed ends or `cancel` fires
    async fn run(
        self,
        handlers: EventHandlers,
        cancel: CancelSignal,
    ) -> Result<SourceExit, SourceError>;
}

/// Source-facing half of the notification channels
#[derive(Clone)]
pub struct EventHandlers {
    added: HandoffSender<Event>,
    updated: HandoffSender<UpdatePair>,
}

/// Router-facing half of the notification channels
pub struct Notifications {
    pub added: HandoffReceiver<Event>,
    pub updated: HandoffReceiver<UpdatePair>,
}

/// Create the add and update channels between a source and the router
pub fn notification_channels() -> (EventHandlers, Notifications) {
    let (added_tx, added_rx) = handoff();
    let (updated_tx, updated_rx) = handoff();
    (
        EventHandlers {
            added: added_tx,
            updated: updated_tx,
        },
        Notifications {
            added: added_rx,
            updated: updated_rx,
        },
    )
}

impl EventHandlers {
    /// Hand an added event to the router.
    ///
    /// Returns false if the router has gone away.
    pub async fn on_add(&self, event: Event) -> bool {
        tracing::debug!(event = %event.key(), "got event");
        self.added.send(event).await.is_ok()
    }

    /// Hand an update to the router.
    ///
    /// Returns false if the router has gone away.
    pub async fn on_update(&self, old: Option<Event>, new: Event) -> bool {
        tracing::trace!(event = %new.key(), count = new.count, "got event update");
        self.updated.send(UpdatePair::new(old, new)).await.is_ok()
    }

    /// Deliver a notification unless cancellation fires first.
    ///
    /// Returns false when the source should stop.
    pub async fn deliver(&self, notification: Notification, cancel: &mut CancelSignal) -> bool {
        let delivery = async {
            match notification {
                Notification::Added(event) => self.on_add(event).await,
                Notification::Updated(pair) => self.on_update(pair.old, pair.new).await,
            }
        };
        tokio::select! {
            delivered = delivery => delivered,
            _ = cancel.cancelled() => false,
        }
    }
}

/// Create a linked cancellation trigger and signal
pub fn cancellation() -> (Canceller, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (Canceller { tx }, CancelSignal { rx })
}

/// Fires the cancellation signal; owned by the shutdown path
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by sources to stop delivering
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation fires or its trigger is dropped
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
