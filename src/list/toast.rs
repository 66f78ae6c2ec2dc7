use std::sync::Mutex;

use tracing::{error, info, warn};

/// User-facing toast sink.
///
/// Errors never propagate past the page layer; they end here instead.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// Precondition failures caught before any request is sent.
    fn validation(&self, message: &str);
}

/// Logs toasts as structured tracing events. Used by the CLI.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(toast = "success", "{message}");
    }

    fn error(&self, message: &str) {
        error!(toast = "error", "{message}");
    }

    fn validation(&self, message: &str) {
        warn!(toast = "validation", "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Records toasts in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *toasts)
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Toast {
                kind,
                message: message.to_string(),
            });
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }

    fn validation(&self, message: &str) {
        self.push(ToastKind::Validation, message);
    }
}
