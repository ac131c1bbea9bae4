// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited JSON event feed
//!
//! Accepts either bare event objects or watch envelopes of the form
//! `{"type": "ADDED", "object": {...}}`, one per line. A store keyed by
//! event identity decides whether a record is an add or an update, the
//! same way an informer cache does.

use super::{CancelSignal, EventHandlers, EventSource, Notification, SourceError, SourceExit};
use async_trait::async_trait;
use efg_core::{Event, EventKey, UpdatePair};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum WatchAction {
    Added,
    Modified,
    Deleted,
    Bookmark,
    Error,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedLine {
    Watch {
        #[serde(rename = "type")]
        action: WatchAction,
        object: Box<Event>,
    },
    Plain(Box<Event>),
}

impl FeedLine {
    /// Whether the line carries an event that cannot be keyed
    fn is_anonymous(&self) -> bool {
        match self {
            FeedLine::Watch {
                action: WatchAction::Bookmark | WatchAction::Error,
                ..
            } => false,
            FeedLine::Watch { object, .. } | FeedLine::Plain(object) => {
                object.metadata.name.is_empty()
            }
        }
    }
}

/// Event source reading a JSON-lines feed
pub struct JsonLinesSource<R> {
    reader: R,
    origin: String,
    store: HashMap<EventKey, Event>,
}

impl JsonLinesSource<BufReader<Stdin>> {
    /// Read the feed from standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), "stdin")
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Read the feed from a file or named pipe
    pub async fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).await.map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R> JsonLinesSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            store: HashMap::new(),
        }
    }

    /// Number of events currently held in the store
    pub fn cached(&self) -> usize {
        self.store.len()
    }

    /// Apply one parsed line to the store
    fn observe(&mut self, line: FeedLine) -> Option<Notification> {
        let event = match line {
            FeedLine::Watch {
                action: WatchAction::Deleted,
                object,
            } => {
                self.store.remove(&object.key());
                return None;
            }
            FeedLine::Watch {
                action: WatchAction::Bookmark | WatchAction::Error,
                ..
            } => return None,
            FeedLine::Watch { object, .. } | FeedLine::Plain(object) => *object,
        };

        match self.store.insert(event.key(), event.clone()) {
            Some(old) => Some(Notification::Updated(UpdatePair::new(Some(old), event))),
            None => Some(Notification::Added(event)),
        }
    }

    fn parse(&mut self, raw: &str, line_no: u64) -> Option<Notification> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<FeedLine>(raw) {
            Ok(line) if line.is_anonymous() => {
                tracing::warn!(
                    origin = %self.origin,
                    line = line_no,
                    "skipping malformed event: missing metadata.name"
                );
                None
            }
            Ok(line) => self.observe(line),
            Err(e) => {
                tracing::warn!(
                    origin = %self.origin,
                    line = line_no,
                    error = %e,
                    "skipping malformed event"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<R> EventSource for JsonLinesSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn run(
        mut self,
        handlers: EventHandlers,
        mut cancel: CancelSignal,
    ) -> Result<SourceExit, SourceError> {
        tracing::info!(origin = %self.origin, "watching events");
        let mut buf = String::new();
        let mut line_no = 0u64;

        loop {
            buf.clear();
            let read = tokio::select! {
                _ = cancel.cancelled() => return Ok(SourceExit::Cancelled),
                read = self.reader.read_line(&mut buf) => read?,
            };
            if read == 0 {
                tracing::info!(origin = %self.origin, lines = line_no, "event feed ended");
                return Ok(SourceExit::Exhausted);
            }
            line_no += 1;

            if let Some(notification) = self.parse(&buf, line_no) {
                if !handlers.deliver(notification, &mut cancel).await {
                    return Ok(SourceExit::Cancelled);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "json_lines_tests.rs"]
mod tests;
