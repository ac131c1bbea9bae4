// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stop path shared by signals, source exhaustion, and sink failures.
//!
//! Stop requests travel on a control queue kept apart from the data
//! hand-offs. The router owns the receiving end and tears down exactly once:
//! [`ShutdownCoordinator::teardown`] consumes the coordinator.

use efg_adapters::{Canceller, Sink, SinkError};
use std::fmt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Why the forwarder is stopping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A process signal, by name
    Signal(&'static str),
    /// The event feed ended
    SourceEnded,
    /// The event source failed
    SourceFailed(String),
    /// A sink write failed
    SinkFailed(String),
    /// Programmatic request
    Requested,
}

impl StopReason {
    /// Whether this stop should be reported as a failed run
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::SinkFailed(_) | StopReason::SourceFailed(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Signal(name) => write!(f, "received {}", name),
            StopReason::SourceEnded => f.write_str("event feed ended"),
            StopReason::SourceFailed(e) => write!(f, "event source failed: {}", e),
            StopReason::SinkFailed(e) => write!(f, "sink write failed: {}", e),
            StopReason::Requested => f.write_str("stop requested"),
        }
    }
}

/// Requests a stop. Cheap to clone; every clone feeds the same queue.
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: mpsc::Sender<StopReason>,
}

impl StopHandle {
    /// Queue a stop request.
    ///
    /// Must not be awaited from the router loop itself; use
    /// [`StopHandle::request_detached`] there.
    pub async fn request(&self, reason: StopReason) {
        if self.tx.send(reason).await.is_err() {
            debug!("stop already completed, ignoring request");
        }
    }

    /// Queue a stop request from a separate task
    pub fn request_detached(&self, reason: StopReason) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move { handle.request(reason).await })
    }
}

/// Result of a teardown
#[derive(Debug)]
pub struct ShutdownReport {
    pub reason: StopReason,
    pub close_result: Result<(), SinkError>,
}

impl ShutdownReport {
    pub fn is_clean(&self) -> bool {
        !self.reason.is_failure()
    }
}

/// Owns the receiving end of the stop queue and the source cancellation
pub struct ShutdownCoordinator {
    stop_rx: mpsc::Receiver<StopReason>,
    canceller: Canceller,
}

impl ShutdownCoordinator {
    pub fn new(canceller: Canceller) -> (Self, StopHandle) {
        let (tx, stop_rx) = mpsc::channel(1);
        (Self { stop_rx, canceller }, StopHandle { tx })
    }

    /// Wait for the next stop request
    pub async fn next_stop(&mut self) -> Option<StopReason> {
        self.stop_rx.recv().await
    }

    /// Cancel the source subscription, then close the sink
    pub async fn teardown<S: Sink>(self, sink: &mut S, reason: StopReason) -> ShutdownReport {
        info!(%reason, "shutting down");
        self.canceller.cancel();
        let close_result = sink.close().await;
        ShutdownReport {
            reason,
            close_result,
        }
    }
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
