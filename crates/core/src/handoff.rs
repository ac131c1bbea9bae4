// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendezvous channel
//!
//! A sender stays parked until the receiver has taken its value, so a
//! producer can never run ahead of the consumer by more than one item.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// The receiving side went away before taking the value
#[derive(Debug, Error, PartialEq, Eq)]
#[error("hand-off receiver closed")]
pub struct HandoffClosed;

struct Parcel<T> {
    value: T,
    taken: oneshot::Sender<()>,
}

/// Create a connected sender/receiver pair
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (HandoffSender { tx }, HandoffReceiver { rx })
}

pub struct HandoffSender<T> {
    tx: mpsc::Sender<Parcel<T>>,
}

impl<T> Clone for HandoffSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> HandoffSender<T> {
    /// Deliver `value` and wait until the receiver has taken it
    pub async fn send(&self, value: T) -> Result<(), HandoffClosed> {
        let (taken, taken_rx) = oneshot::channel();
        self.tx
            .send(Parcel { value, taken })
            .await
            .map_err(|_| HandoffClosed)?;
        taken_rx.await.map_err(|_| HandoffClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct HandoffReceiver<T> {
    rx: mpsc::Receiver<Parcel<T>>,
}

impl<T> HandoffReceiver<T> {
    /// Take the next value, releasing its sender.
    ///
    /// Returns `None` once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<T> {
        let parcel = self.rx.recv().await?;
        // The sender may have given up waiting; the value is still ours
        let _ = parcel.taken.send(());
        Some(parcel.value)
    }
}

#[cfg(test)]
#[path = "handoff_tests.rs"]
mod tests;
