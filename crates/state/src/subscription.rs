//! Subscriptions to a state cell.

use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to a [`StateCell`](crate::StateCell).
///
/// The first message is always the cell's value at subscription time; every
/// later publish is delivered in order.
///
/// ```ignore
/// let cart_updates = cart_store.subscribe();
/// let current = cart_updates.recv()?;
///
/// cart_store.clear_cart();
/// assert!(cart_updates.latest().unwrap().is_empty());
/// ```
///
/// Dropping the subscription unregisters it on the next publish.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Block until the next value is available.
    pub fn recv(&self) -> Result<T, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a value without blocking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a value.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Every value published since the last read, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// The most recent pending value, discarding older ones.
    pub fn latest(&self) -> Option<T> {
        self.receiver.try_iter().last()
    }
}
