//! Thread-safe hand-off from sampler threads to the UI thread.
//!
//! Producers hold a cloneable [`Dispatcher`] and never block. The UI thread
//! owns the single [`DispatchQueue`] and drains it once per frame.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError};

use super::snapshot::{Family, Snapshot};

/// Messages delivered to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    Snapshot(Family, Arc<Snapshot>),
    Status(String),
}

/// Producer side of the queue.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<UiMessage>,
}

impl Dispatcher {
    /// Enqueue a message. Returns false once the UI side is gone.
    pub fn send(&self, message: UiMessage) -> bool {
        self.tx.send(message).is_ok()
    }

    pub fn snapshot(&self, family: Family, snapshot: Arc<Snapshot>) -> bool {
        self.send(UiMessage::Snapshot(family, snapshot))
    }

    pub fn status_handle(&self) -> StatusHandle {
        StatusHandle {
            dispatcher: self.clone(),
        }
    }
}

/// Thread-safe setter for the status bar text.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    dispatcher: Dispatcher,
}

impl StatusHandle {
    pub fn set<S: Into<String>>(&self, message: S) {
        let message = message.into();
        log::debug!("Status updated: {}", message);
        if !self.dispatcher.send(UiMessage::Status(message)) {
            log::trace!("Status update dropped: UI queue closed");
        }
    }
}

/// Consumer side of the queue, owned by the UI thread.
#[derive(Debug)]
pub struct DispatchQueue {
    rx: mpsc::UnboundedReceiver<UiMessage>,
}

impl DispatchQueue {
    pub fn new() -> (Dispatcher, DispatchQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { tx }, DispatchQueue { rx })
    }

    /// Take every message currently queued, in arrival order.
    pub fn drain(&mut self) -> Vec<UiMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }

    /// Drain, keeping only the latest snapshot per family and the latest
    /// status text. Snapshots are returned in family order.
    pub fn drain_latest(&mut self) -> (Vec<(Family, Arc<Snapshot>)>, Option<String>) {
        let mut latest: HashMap<Family, Arc<Snapshot>> = HashMap::new();
        let mut status = None;

        for message in self.drain() {
            match message {
                UiMessage::Snapshot(family, snapshot) => {
                    latest.insert(family, snapshot);
                }
                UiMessage::Status(text) => status = Some(text),
            }
        }

        let mut snapshots: Vec<_> = latest.into_iter().collect();
        snapshots.sort_by_key(|(family, _)| *family);
        (snapshots, status)
    }
}
