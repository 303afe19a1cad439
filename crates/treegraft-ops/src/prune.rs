//! Recursive tree removal.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use treegraft_core::{FsOp, Result, TreeError};

use crate::executor::TreeOps;
use crate::fs::{BoxFuture, Filesystem};

impl<F: Filesystem> TreeOps<F> {
    /// Recursively delete `directory` and everything beneath it.
    ///
    /// Symbolic links and other non-directory entries are unlinked, never
    /// followed. A directory is removed only after all of its children
    /// were; the first error stops the walk.
    pub async fn prune(&self, directory: impl AsRef<Path>) -> Result<()> {
        let directory = directory.as_ref();
        if directory.as_os_str().is_empty() {
            return Err(TreeError::empty_argument("Target directory"));
        }

        let directory = self.resolve(directory);
        info!(path = %directory.display(), "pruning tree");
        self.prune_tree(directory).await
    }

    /// Remove the entries of `dir` in listing order, then `dir` itself.
    pub(crate) fn prune_tree(&self, dir: PathBuf) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for name in self.entries(&dir).await? {
                let path = dir.join(&name);
                if self.entry_kind(&path).await?.is_dir() {
                    self.prune_tree(path).await?;
                } else {
                    self.fs
                        .remove_file(&path)
                        .await
                        .map_err(|e| TreeError::io(FsOp::RemoveFile, &path, e))?;
                    debug!(path = %path.display(), "removed file");
                }
            }

            self.fs
                .remove_dir(&dir)
                .await
                .map_err(|e| TreeError::io(FsOp::RemoveDir, &dir, e))?;
            debug!(path = %dir.display(), "removed directory");
            Ok(())
        })
    }
}
