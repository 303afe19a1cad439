//! Bulk file removal.

use std::path::Path;

use tracing::{debug, info};
use treegraft_core::{FsOp, Result, TreeError};

use crate::executor::TreeOps;
use crate::fs::Filesystem;

impl<F: Filesystem> TreeOps<F> {
    /// Remove each file in `paths`, strictly in order.
    ///
    /// The whole list is validated before anything is removed: an empty
    /// path anywhere in it rejects the call with an invalid argument error
    /// and nothing is touched. A file that
    /// is already gone produces a notification instead of an error; any
    /// other failure stops the removal and is returned.
    pub async fn remove_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        if paths.iter().any(|p| p.as_ref().as_os_str().is_empty()) {
            return Err(TreeError::invalid_argument(
                "Path list can only contain non-empty paths",
            ));
        }

        info!(count = paths.len(), "removing files");
        for path in paths {
            let path = path.as_ref();
            match self.fs.remove_file(&self.resolve(path)).await {
                Ok(()) => debug!(path = %path.display(), "removed file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    self.notifier.missing_file(path);
                }
                Err(e) => return Err(TreeError::io(FsOp::RemoveFile, path, e)),
            }
        }
        Ok(())
    }
}
