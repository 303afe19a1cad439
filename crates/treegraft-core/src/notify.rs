//! Advisory notifications and the sinks that receive them.
//!
//! Notifications describe anomalies that do not fail an operation, such as
//! a skipped symlink during a copy or a file that was already gone when
//! bulk removal reached it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// An entry was neither a regular file nor a directory and was not copied.
    SkippedEntry,
    /// A file scheduled for removal did not exist.
    MissingFile,
}

/// Non-fatal message emitted during an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Kind of notification.
    pub kind: NotificationKind,
    /// Path the notification is about.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Create a notification for an entry the copier refused to duplicate.
    pub fn skipped_entry(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "Not a regular file or a directory, omitting {}",
                path.display()
            ),
            path,
            kind: NotificationKind::SkippedEntry,
        }
    }

    /// Create a notification for a file that was missing at removal time.
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Could not find file {} for removal", path.display()),
            path,
            kind: NotificationKind::MissingFile,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receiver of notifications.
///
/// Implementations must not block for long: the operation that emits a
/// notification waits for `emit` to return before touching the
/// filesystem again.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn emit(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn emit(&self, notification: &Notification) {
        self(notification)
    }
}

/// Sink that forwards notifications over an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn emit(&self, notification: &Notification) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.tx.send(notification.clone());
    }
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<Notification>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    /// Take everything received so far, leaving the sink empty.
    pub fn take(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut list| std::mem::take(&mut *list))
            .unwrap_or_default()
    }

    /// Number of notifications received.
    pub fn len(&self) -> usize {
        self.received.lock().map(|list| list.len()).unwrap_or(0)
    }

    /// Check if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MemorySink {
    fn emit(&self, notification: &Notification) {
        if let Ok(mut list) = self.received.lock() {
            list.push(notification.clone());
        }
    }
}

/// Dispatches notifications to the registered sink, if any.
///
/// With no sink registered, notifications are discarded.
#[derive(Clone, Default)]
pub struct Notifier {
    sink: Option<Arc<dyn NotificationSink>>,
    log: bool,
}

impl Notifier {
    /// Create a notifier that discards everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that delivers to `sink`.
    pub fn with_sink(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink: Some(sink),
            log: false,
        }
    }

    /// Also mirror every notification to `tracing` at warn level.
    pub fn with_logging(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Register a sink, replacing any previous one.
    pub fn set_sink(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sink = Some(sink);
    }

    /// Drop the registered sink; later notifications are discarded.
    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    /// Check if a sink is registered.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Deliver a notification.
    pub fn emit(&self, notification: Notification) {
        if self.log {
            tracing::warn!(path = %notification.path.display(), "{}", notification.message);
        }
        if let Some(sink) = &self.sink {
            sink.emit(&notification);
        }
    }

    /// Report an entry skipped because it is not a file or directory.
    pub fn skipped_entry(&self, path: &Path) {
        self.emit(Notification::skipped_entry(path));
    }

    /// Report a file that was missing at removal time.
    pub fn missing_file(&self, path: &Path) {
        self.emit(Notification::missing_file(path));
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("has_sink", &self.has_sink())
            .field("log", &self.log)
            .finish()
    }
}
