// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::sink::{Sink, SinkError};
use async_trait::async_trait;
use efg_core::GelfMessage;
use tracing::Instrument;

/// Wrapper that adds tracing to any Sink
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: Sink> Sink for TracedSink<S> {
    async fn write(&mut self, message: &GelfMessage) -> Result<(), SinkError> {
        let span = tracing::info_span!(
            "sink.write",
            event = %message.extra.event_name,
            level = message.level
        );

        async {
            tracing::debug!("send message to graylog");
            tracing::trace!(?message, "message body");

            let start = std::time::Instant::now();
            let result = self.inner.write(message).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "written"),
                Err(e) => tracing::debug!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "write failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        let span = tracing::info_span!("sink.close");

        async {
            let result = self.inner.close().await;
            // A failed close is reported but does not stop teardown
            match &result {
                Ok(()) => tracing::info!("closed"),
                Err(e) => tracing::warn!(error = %e, "close failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
