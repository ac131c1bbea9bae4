// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event router: the single decision loop between source and sink.
//!
//! The loop multiplexes three inputs: added events, updated events, and
//! stop requests. Each notification gets exactly one forward-or-discard
//! decision; forwarded messages are written synchronously, so the loop is
//! busy (and the source parked) for the duration of a write.

use crate::shutdown::{ShutdownCoordinator, ShutdownReport, StopHandle, StopReason};
use efg_adapters::{
    cancellation, notification_channels, CancelSignal, EventHandlers, Notifications, Sink,
};
use efg_core::{
    evaluate_add, evaluate_update, Clock, Decision, Event, GelfMessage, MessageBuilder, UpdatePair,
};
use tracing::{debug, error, info, trace};

/// Lifecycle of the router loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Running,
    /// A write failed and a stop has been requested; data is drained, not forwarded
    Stopping,
    Stopped,
}

/// Collaborators injected into the router
pub struct RouterDeps<S, C> {
    pub sink: S,
    pub clock: C,
    pub builder: MessageBuilder,
}

/// Source- and control-facing ends created alongside a router
pub struct RouterHandles {
    /// Hand to the event source
    pub handlers: EventHandlers,
    /// Hand to the event source
    pub cancel: CancelSignal,
    /// Clone for anything that may need to stop the forwarder
    pub stop: StopHandle,
}

/// Per-run counters, logged on exit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub received: u64,
    pub forwarded: u64,
    pub discarded: u64,
}

pub struct EventRouter<S, C> {
    sink: S,
    clock: C,
    builder: MessageBuilder,
    notifications: Notifications,
    shutdown: ShutdownCoordinator,
    stop: StopHandle,
    state: RouterState,
    stats: RouterStats,
}

impl<S, C> EventRouter<S, C>
where
    S: Sink,
    C: Clock,
{
    pub fn new(deps: RouterDeps<S, C>) -> (Self, RouterHandles) {
        let (handlers, notifications) = notification_channels();
        let (canceller, cancel) = cancellation();
        let (shutdown, stop) = ShutdownCoordinator::new(canceller);

        let router = Self {
            sink: deps.sink,
            clock: deps.clock,
            builder: deps.builder,
            notifications,
            shutdown,
            stop: stop.clone(),
            state: RouterState::Running,
            stats: RouterStats::default(),
        };
        let handles = RouterHandles {
            handlers,
            cancel,
            stop,
        };
        (router, handles)
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// Run until a stop request is accepted, then tear down.
    ///
    /// Returns only after the sink has been closed.
    pub async fn run(mut self) -> ShutdownReport {
        info!(
            host = self.builder.host(),
            cluster = self.builder.cluster(),
            "forwarding events"
        );

        loop {
            tokio::select! {
                biased;

                Some(reason) = self.shutdown.next_stop() => {
                    return self.finish(reason).await;
                }
                Some(event) = self.notifications.added.recv() => {
                    self.on_add(event).await;
                }
                Some(pair) = self.notifications.updated.recv() => {
                    self.on_update(pair).await;
                }
                // The router holds a stop handle, so the control queue never closes
                else => {
                    return self.finish(StopReason::Requested).await;
                }
            }
        }
    }

    async fn on_add(&mut self, event: Event) {
        self.stats.received += 1;
        if self.state != RouterState::Running {
            self.drop_while_stopping(&event);
            return;
        }

        match evaluate_add(&event, self.clock.now()) {
            Decision::Forward => {
                let message = self.builder.added(&event);
                self.forward(message).await;
            }
            Decision::Discard(reason) => {
                self.stats.discarded += 1;
                trace!(event = %event.key(), %reason, "discarding added event");
            }
        }
    }

    async fn on_update(&mut self, pair: UpdatePair) {
        self.stats.received += 1;
        if self.state != RouterState::Running {
            self.drop_while_stopping(&pair.new);
            return;
        }

        match evaluate_update(&pair, self.clock.now()) {
            Decision::Forward => {
                debug!(
                    event = %pair.new.key(),
                    count = pair.new.count,
                    "observed updated event"
                );
                let message = self.builder.updated(&pair.new);
                self.forward(message).await;
            }
            Decision::Discard(reason) => {
                self.stats.discarded += 1;
                trace!(event = %pair.new.key(), %reason, "discarding event update");
            }
        }
    }

    fn drop_while_stopping(&mut self, event: &Event) {
        self.stats.discarded += 1;
        debug!(event = %event.key(), "stopping, event not forwarded");
    }

    async fn forward(&mut self, message: GelfMessage) {
        match self.sink.write(&message).await {
            Ok(()) => self.stats.forwarded += 1,
            Err(e) => {
                error!(error = %e, "failed to write to sink");
                self.state = RouterState::Stopping;
                // The loop is the only consumer of the stop queue; requesting
                // from here directly could wait on ourselves
                self.stop.request_detached(StopReason::SinkFailed(e.to_string()));
            }
        }
    }

    async fn finish(mut self, reason: StopReason) -> ShutdownReport {
        let report = self.shutdown.teardown(&mut self.sink, reason).await;
        self.state = RouterState::Stopped;

        info!(
            state = ?self.state,
            received = self.stats.received,
            forwarded = self.stats.forwarded,
            discarded = self.stats.discarded,
            "router stopped"
        );
        report
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
