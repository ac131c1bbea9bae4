// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink adapters

mod gelf;

pub use gelf::{encode_frame, GelfTcpSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSink, SinkCall};

use async_trait::async_trait;
use efg_core::GelfMessage;
use thiserror::Error;

/// Errors from sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: std::io::Error,
    },
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink is closed")]
    Closed,
    #[error("{0}")]
    Rejected(String),
}

/// Destination for normalized log messages.
///
/// Each write is framed independently by the transport. Writes are
/// synchronous from the caller's point of view: the future resolves once
/// the message has been handed to the transport.
#[async_trait]
pub trait Sink: Send + 'static {
    /// Write one message
    async fn write(&mut self, message: &GelfMessage) -> Result<(), SinkError>;

    /// Flush and release the transport
    async fn close(&mut self) -> Result<(), SinkError>;
}
