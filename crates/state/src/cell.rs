//! Current-value cell with synchronous fan-out.

use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};

use crate::subscription::Subscription;

/// Observable current-value cell.
///
/// - `subscribe()` replays the current value, then every later publish
/// - `set`/`update` deliver the new value to all live subscribers before returning
/// - No IO, no async; the lock is never held by callers across an await
#[derive(Debug)]
pub struct StateCell<T> {
    inner: Mutex<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    value: T,
    subscribers: Vec<mpsc::Sender<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock().value)
    }

    /// Replace the value and publish it.
    pub fn set(&self, value: T) {
        let mut inner = self.lock();
        inner.value = value;
        inner.publish();
    }

    /// Mutate the value in place and publish the result.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut inner = self.lock();
        let out = f(&mut inner.value);
        inner.publish();
        out
    }

    /// Register a subscriber; the current value is delivered first.
    ///
    /// The channel is unbounded: every publish queues a full clone of the value
    /// until it is received. Consumers that only care about the current value
    /// should call [`Subscription::latest`] to collapse the backlog, and
    /// subscriptions that are no longer read should be dropped so the next
    /// publish prunes them.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();

        // Receiver is alive, send cannot fail.
        let _ = tx.send(inner.value.clone());
        inner.subscribers.push(tx);

        Subscription::new(rx)
    }

    /// Number of subscribers that were alive at the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    // A panic inside an `update` closure leaves the value as the closure left
    // it; keep serving that value rather than poisoning every store.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Inner<T> {
    fn publish(&mut self) {
        let value = &self.value;
        // Drop dead subscribers while publishing.
        self.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
