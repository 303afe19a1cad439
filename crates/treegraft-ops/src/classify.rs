//! Entry classification.

use std::path::Path;

use treegraft_core::{EntryKind, FsOp, Result, TreeError};

use crate::executor::TreeOps;
use crate::fs::Filesystem;

impl<F: Filesystem> TreeOps<F> {
    /// Determine what kind of object lives at `path`, without following links.
    pub async fn classify(&self, path: impl AsRef<Path>) -> Result<EntryKind> {
        let path = self.resolve(path.as_ref());
        self.entry_kind(&path).await
    }

    /// Classify an already-resolved path.
    pub(crate) async fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        self.fs
            .entry_kind(path)
            .await
            .map_err(|e| TreeError::io(FsOp::Stat, path, e))
    }

    /// List an already-resolved directory.
    pub(crate) async fn entries(&self, path: &Path) -> Result<Vec<std::ffi::OsString>> {
        self.fs
            .list_dir(path)
            .await
            .map_err(|e| TreeError::io(FsOp::ListDir, path, e))
    }
}
