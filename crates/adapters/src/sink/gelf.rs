// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GELF over TCP
//!
//! Each message is a JSON document terminated by a single NUL byte.

use super::{Sink, SinkError};
use async_trait::async_trait;
use efg_core::GelfMessage;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

/// Encode a message as a NUL-terminated GELF frame
pub fn encode_frame(message: &GelfMessage) -> Result<Vec<u8>, SinkError> {
    let mut frame = serde_json::to_vec(message)?;
    frame.push(0);
    Ok(frame)
}

/// Sink writing to a Graylog GELF TCP input
pub struct GelfTcpSink {
    endpoint: String,
    stream: Option<BufWriter<TcpStream>>,
}

impl GelfTcpSink {
    /// Connect to `host:port`
    pub async fn connect(host: &str, port: u16) -> Result<Self, SinkError> {
        let endpoint = format!("{}:{}", host, port);
        tracing::info!(%endpoint, "connecting to graylog");
        let stream = TcpStream::connect(&endpoint)
            .await
            .map_err(|source| SinkError::Connect {
                endpoint: endpoint.clone(),
                source,
            })?;
        stream.set_nodelay(true)?;

        Ok(Self {
            endpoint,
            stream: Some(BufWriter::new(stream)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Sink for GelfTcpSink {
    async fn write(&mut self, message: &GelfMessage) -> Result<(), SinkError> {
        let stream = self.stream.as_mut().ok_or(SinkError::Closed)?;
        let frame = encode_frame(message)?;
        stream.write_all(&frame).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        stream.flush().await?;
        stream.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "gelf_tests.rs"]
mod tests;
