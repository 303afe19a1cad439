//! Operation executor bundling a filesystem, a notification sink and config.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use treegraft_core::{NotificationSink, Notifier, OpsConfig};

use crate::fs::{Filesystem, TokioFs};

/// Runs graft, prune and file removal against one filesystem.
///
/// The executor owns the notification sink for its operations. With no
/// sink registered, notifications are discarded.
#[derive(Debug)]
pub struct TreeOps<F = TokioFs> {
    pub(crate) fs: F,
    pub(crate) notifier: Notifier,
    pub(crate) config: OpsConfig,
}

impl TreeOps<TokioFs> {
    /// Create an executor over the local filesystem with default settings.
    pub fn new() -> Self {
        Self::with_filesystem(TokioFs)
    }
}

impl Default for TreeOps<TokioFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem> TreeOps<F> {
    /// Create an executor over the given filesystem.
    pub fn with_filesystem(fs: F) -> Self {
        let config = OpsConfig::default();
        Self {
            fs,
            notifier: Notifier::new().with_logging(config.log_notifications),
            config,
        }
    }

    /// Register a notification sink.
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifier.set_sink(sink);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: OpsConfig) -> Self {
        self.notifier = self.notifier.with_logging(config.log_notifications);
        self.config = config;
        self
    }

    /// Register a notification sink, replacing any previous one.
    pub fn set_sink(&mut self, sink: Arc<dyn NotificationSink>) {
        self.notifier.set_sink(sink);
    }

    /// Drop the notification sink; later notifications are discarded.
    pub fn clear_sink(&mut self) {
        self.notifier.clear_sink();
    }

    /// The filesystem this executor operates on.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// The active configuration.
    pub fn config(&self) -> &OpsConfig {
        &self.config
    }

    /// Resolve a caller-supplied path against the configured working directory.
    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        self.config.resolve(path)
    }
}
