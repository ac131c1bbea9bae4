// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarder lifecycle: startup, running the source against the router,
//! and turning process signals into stop requests.

use crate::config::{Config, FeedLocation};
use crate::fqdn::{resolve_fqdn, HostError};
use async_trait::async_trait;
use efg_adapters::{
    CancelSignal, EventHandlers, EventSource, GelfTcpSink, JsonLinesSource, Sink, SinkError,
    SourceError, SourceExit, TracedSink,
};
use efg_core::{Clock, MessageBuilder, SystemClock};
use efg_engine::{EventRouter, RouterDeps, RouterHandles, ShutdownReport, StopHandle, StopReason};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{BufReader, Stdin};
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Forwarder with concrete adapter types (sink wrapped with tracing)
pub type DaemonForwarder = Forwarder<TracedSink<GelfTcpSink>, SystemClock>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to resolve host name: {0}")]
    Host(#[from] HostError),

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// The configured event feed
pub enum Feed {
    Stdin(JsonLinesSource<BufReader<Stdin>>),
    File(JsonLinesSource<BufReader<File>>),
}

impl Feed {
    pub async fn open(location: &FeedLocation) -> Result<Self, SourceError> {
        match location {
            FeedLocation::Stdin => Ok(Feed::Stdin(JsonLinesSource::stdin())),
            FeedLocation::File(path) => Ok(Feed::File(JsonLinesSource::open(path).await?)),
        }
    }
}

#[async_trait]
impl EventSource for Feed {
    async fn run(
        self,
        handlers: EventHandlers,
        cancel: CancelSignal,
    ) -> Result<SourceExit, SourceError> {
        match self {
            Feed::Stdin(source) => source.run(handlers, cancel).await,
            Feed::File(source) => source.run(handlers, cancel).await,
        }
    }
}

/// A router together with the handles its source and controllers need
pub struct Forwarder<S, C> {
    router: EventRouter<S, C>,
    handles: RouterHandles,
}

impl<S, C> Forwarder<S, C>
where
    S: Sink,
    C: Clock,
{
    pub fn new(deps: RouterDeps<S, C>) -> Self {
        let (router, handles) = EventRouter::new(deps);
        Self { router, handles }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.handles.stop.clone()
    }

    /// Run `source` against the router until a stop is accepted.
    ///
    /// Feed exhaustion and source failures become stop requests. Returns after
    /// the sink is closed and the source has released its subscription.
    pub async fn run<E: EventSource>(self, source: E) -> ShutdownReport {
        let RouterHandles {
            handlers,
            cancel,
            stop,
        } = self.handles;

        let source_task = tokio::spawn(async move {
            match source.run(handlers, cancel).await {
                Ok(SourceExit::Exhausted) => stop.request(StopReason::SourceEnded).await,
                Ok(SourceExit::Cancelled) => debug!("event source cancelled"),
                Err(e) => {
                    error!(error = %e, "event source failed");
                    stop.request(StopReason::SourceFailed(e.to_string())).await;
                }
            }
        });

        let report = self.router.run().await;

        if let Err(e) = source_task.await {
            warn!(error = %e, "event source task did not finish cleanly");
        }
        report
    }
}

/// Resolve the host, connect the sink and open the event feed
pub async fn startup(config: &Config) -> Result<(DaemonForwarder, Feed), LifecycleError> {
    let host = match resolve_fqdn() {
        Ok(host) => host,
        Err(e) => {
            warn!(error = %e, "could not resolve host name, sending empty host");
            String::new()
        }
    };
    info!(host = %host, cluster = %config.cluster, "resolved reporting host");

    let feed = Feed::open(&config.feed()).await?;
    let sink = GelfTcpSink::connect(&config.host, config.port).await?;

    let forwarder = Forwarder::new(RouterDeps {
        sink: TracedSink::new(sink),
        clock: SystemClock,
        builder: MessageBuilder::new(host, config.cluster.clone()),
    });
    Ok((forwarder, feed))
}

/// Request a stop on the first SIGTERM or SIGINT
pub fn install_signal_handler(stop: StopHandle) -> Result<JoinHandle<()>, LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate()).map_err(LifecycleError::Signal)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(LifecycleError::Signal)?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        info!(signal = name, "received signal, shutting down");
        stop.request(StopReason::Signal(name)).await;
    }))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
