//! Transient user notifications (toasts).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::cell::StateCell;
use crate::subscription::Subscription;

/// How long a toast stays visible unless the caller overrides it.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ToastId(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

/// Publishes the list of active toasts.
///
/// Showing a toast never blocks the caller; the display layer decides when to
/// `dismiss` it (usually after `duration`).
#[derive(Debug, Default)]
pub struct Notifier {
    toasts: StateCell<Vec<Toast>>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.show_for(message, kind, DEFAULT_TOAST_DURATION)
    }

    pub fn show_for(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let toast = Toast {
            id,
            message: message.into(),
            kind,
            duration,
        };
        tracing::debug!(toast_id = id.0, kind = ?toast.kind, message = %toast.message, "toast shown");
        self.toasts.update(|toasts| toasts.push(toast));
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Error)
    }

    /// Remove a toast; returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.toasts.update(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        })
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn subscribe(&self) -> Subscription<Vec<Toast>> {
        self.toasts.subscribe()
    }
}
