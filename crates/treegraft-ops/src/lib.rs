//! Tree copy and removal engine for treegraft.
//!
//! This crate walks directory trees strictly sequentially, depth-first, in
//! the order the filesystem lists entries. Every filesystem call goes
//! through the [`Filesystem`] capability, so the walker can run against the
//! real disk ([`TokioFs`]) or any other implementation.

mod classify;
mod copy;
mod executor;
mod fs;
mod prune;
mod remove;

use std::path::{Path, PathBuf};

pub use executor::TreeOps;
pub use fs::{BoxFuture, Filesystem, TokioFs};
pub use treegraft_core::{
    EntryKind, ErrorKind, Notification, NotificationKind, NotificationSink, OpsConfig, Result,
    TreeError,
};

/// Copy directory `source` into `destination/<basename of source>` on the
/// local filesystem, discarding notifications.
pub async fn graft(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<PathBuf> {
    TreeOps::new().graft(source, destination).await
}

/// Recursively delete `directory` on the local filesystem.
pub async fn prune(directory: impl AsRef<Path>) -> Result<()> {
    TreeOps::new().prune(directory).await
}

/// Delete each file in `paths`, in order, tolerating missing files.
pub async fn remove_files<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    TreeOps::new().remove_files(paths).await
}
