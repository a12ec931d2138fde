//! Session event feed (notification mechanics only).
//!
//! A lightweight single-producer fan-out: [`SessionState`](crate::SessionState)
//! is the only publisher, and each subscriber receives a copy of every event
//! in publish order. The feed distributes; it does not store. Observers that
//! miss events can always re-read the current identity from session state.

use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Duration;

use crate::events::SessionEvent;

/// A subscription to session-change events.
///
/// Designed for single-threaded, cooperative consumption: drain with
/// [`try_recv`](Subscription::try_recv) from the event loop, or block with
/// [`recv`](Subscription::recv) when a dedicated consumer thread exists.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<SessionEvent>,
}

impl Subscription {
    pub(crate) fn new(receiver: mpsc::Receiver<SessionEvent>) -> Self {
        Self { receiver }
    }

    /// Block until the next event is available.
    pub fn recv(&self) -> Result<SessionEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Result<SessionEvent, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Single-producer session event feed.
///
/// - No IO / no async
/// - Best-effort fan-out in publish order
/// - Dead subscribers are dropped on publish
#[derive(Debug, Default)]
pub struct SessionFeed {
    subscribers: Mutex<Vec<mpsc::Sender<SessionEvent>>>,
}

impl SessionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&self, event: &SessionEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            // Poisoned lock: a subscriber list we can no longer trust.
            // Observers fall back to reading session state directly.
            return;
        };

        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Register a new subscriber; it receives every event published after
    /// this call.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}
