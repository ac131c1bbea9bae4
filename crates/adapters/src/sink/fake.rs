// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Sink, SinkError};
use async_trait::async_trait;
use efg_core::GelfMessage;
use std::sync::{Arc, Mutex};

/// Recorded sink call
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Write(GelfMessage),
    Close,
}

impl SinkCall {
    pub fn name(&self) -> &'static str {
        match self {
            SinkCall::Write(_) => "Write",
            SinkCall::Close => "Close",
        }
    }
}

/// Fake sink for testing.
///
/// Clones share the same call record, so a test can keep one handle while
/// the code under test owns another.
#[derive(Clone, Default)]
pub struct FakeSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
    write_error: Arc<Mutex<Option<String>>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `message`
    pub fn fail_writes(&self, message: &str) {
        *self.write_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Names of the recorded calls, in order
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(SinkCall::name).collect()
    }

    /// Messages passed to `write`, including failed ones
    pub fn messages(&self) -> Vec<GelfMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Write(message) => Some(message),
                SinkCall::Close => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, SinkCall::Close))
            .count()
    }
}

#[async_trait]
impl Sink for FakeSink {
    async fn write(&mut self, message: &GelfMessage) -> Result<(), SinkError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SinkCall::Write(message.clone()));

        match self
            .write_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(error) => Err(SinkError::Rejected(error.clone())),
            None => Ok(()),
        }
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SinkCall::Close);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
