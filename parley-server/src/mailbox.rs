//! Multi-producer, single-consumer channel whose writes never block.
//!
//! A write that finds the buffer full is parked as an in-flight delivery
//! instead of suspending the writer. Closing the mailbox cancels every
//! parked delivery and waits for them to finish, so no task outlives it.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

struct Shared<T> {
    sender: Mutex<Option<mpsc::Sender<T>>>,
    closing: CancellationToken,
    in_flight: TaskTracker,
}

/// Write side of a mailbox. Cheap to clone; every clone feeds the same
/// receiver.
pub struct Mailbox<T> {
    shared: Arc<Shared<T>>,
}

/// Read side of a mailbox. Owned by exactly one actor.
pub struct MailboxReceiver<T> {
    rx: mpsc::Receiver<T>,
    closing: CancellationToken,
}

/// Creates a mailbox buffering up to `capacity` values before writes go
/// in flight.
pub fn mailbox<T: Send + 'static>(capacity: usize) -> (Mailbox<T>, MailboxReceiver<T>) {
    let (sender, rx) = mpsc::channel(capacity.max(1));
    let closing = CancellationToken::new();

    let shared = Arc::new(Shared {
        sender: Mutex::new(Some(sender)),
        closing: closing.clone(),
        in_flight: TaskTracker::new(),
    });

    (Mailbox { shared }, MailboxReceiver { rx, closing })
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> Mailbox<T> {
    /// Delivers `value` without waiting for the reader.
    ///
    /// After `close` has begun the value is silently dropped.
    pub fn write(&self, value: T) {
        let guard = self
            .shared
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(sender) = guard.as_ref() else {
            return;
        };
        if self.shared.closing.is_cancelled() {
            return;
        }

        match sender.try_send(value) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(value)) => {
                let sender = sender.clone();
                let closing = self.shared.closing.clone();
                self.shared.in_flight.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = closing.cancelled() => {}
                        _ = sender.send(value) => {}
                    }
                });
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }

    /// Stops accepting writes, abandons in-flight deliveries and waits for
    /// them to finish. Buffered values are discarded by the receiver.
    ///
    /// Safe to call more than once and with no active reader.
    pub async fn close(&self) {
        self.shared.closing.cancel();
        self.shutdown().await;
    }

    /// Stops accepting writes but lets in-flight deliveries land.
    ///
    /// Only returns once the reader has drained enough of the buffer for
    /// every parked write to complete, so it must not be awaited without
    /// an active reader.
    pub async fn close_without_draining(&self) {
        self.shutdown().await;
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closing.is_cancelled()
            || self
                .shared
                .sender
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_none()
    }

    async fn shutdown(&self) {
        let sender = self
            .shared
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(sender);

        self.shared.in_flight.close();
        self.shared.in_flight.wait().await;
    }
}

impl<T> MailboxReceiver<T> {
    /// Next value, or `None` once the mailbox is closed.
    ///
    /// A cancelling close discards whatever is still buffered.
    pub async fn recv(&mut self) -> Option<T> {
        if self.closing.is_cancelled() {
            self.discard();
            return None;
        }

        tokio::select! {
            biased;
            _ = self.closing.cancelled() => {
                self.discard();
                None
            }
            value = self.rx.recv() => value,
        }
    }

    fn discard(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}
