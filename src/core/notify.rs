//! Notification seam for save/update feedback (toasts in a UI, lines in a CLI).

use std::{fmt, sync::Mutex};

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        };
        f.write_str(label)
    }
}

/// Receives user-facing messages emitted by the planner.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => error!(%kind, "{message}"),
            _ => info!(%kind, "{message}"),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, NotificationKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the notifications received so far.
    pub fn messages(&self) -> Vec<(String, NotificationKind)> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push((message.to_string(), kind));
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, message: &str, kind: NotificationKind) {
        (**self).notify(message, kind)
    }
}
