//! Tree copy and graft.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use treegraft_core::{EntryKind, FsOp, Result, TreeError};

use crate::executor::TreeOps;
use crate::fs::{BoxFuture, Filesystem};

impl<F: Filesystem> TreeOps<F> {
    /// Copy directory `source` into a new directory
    /// `destination/<basename of source>`.
    ///
    /// The new directory must not exist yet, and no file is ever
    /// overwritten. If anything fails after the new directory was created,
    /// it is pruned before the error is returned; should that cleanup fail
    /// as well, [`TreeError::RollbackFailed`] carries both errors.
    ///
    /// Returns the path of the new directory.
    pub async fn graft(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let (source, destination) = (source.as_ref(), destination.as_ref());
        if source.as_os_str().is_empty() {
            return Err(TreeError::empty_argument("Source"));
        }
        if destination.as_os_str().is_empty() {
            return Err(TreeError::empty_argument("Destination"));
        }
        let name = source.file_name().ok_or_else(|| {
            TreeError::invalid_argument(format!(
                "Source path {} has no base name",
                source.display()
            ))
        })?;

        let source = self.resolve(source);
        let new_path = self.resolve(destination).join(name);
        info!(source = %source.display(), dest = %new_path.display(), "grafting tree");

        self.fs
            .create_dir(&new_path)
            .await
            .map_err(|e| TreeError::io(FsOp::CreateDir, &new_path, e))?;

        if let Err(err) = self.copy_tree(&source, &new_path).await {
            warn!(dest = %new_path.display(), error = %err, "graft failed, pruning partial copy");
            return match self.prune_tree(new_path).await {
                Ok(()) => Err(err),
                Err(cleanup) => Err(TreeError::rollback_failed(err, cleanup)),
            };
        }

        info!(dest = %new_path.display(), "graft complete");
        Ok(new_path)
    }

    /// Copy everything inside `source` into `destination`.
    ///
    /// Both must be existing directories. Subdirectories are created fresh
    /// and files are copied exclusively; entries that are neither are
    /// skipped with a notification. The first error stops the whole walk.
    pub async fn copy_entries(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<()> {
        let source = self.resolve(source.as_ref());
        let destination = self.resolve(destination.as_ref());
        self.copy_tree(&source, &destination).await
    }

    /// Copy the contents of an already-resolved `source` into `destination`.
    pub(crate) async fn copy_tree(&self, source: &Path, destination: &Path) -> Result<()> {
        let entries = self.entries(source).await?;
        self.copy_level(source, destination, PathBuf::new(), entries)
            .await
    }

    /// Copy one directory level, descending into each subdirectory before
    /// moving on to the next sibling.
    fn copy_level<'a>(
        &'a self,
        source: &'a Path,
        destination: &'a Path,
        offset: PathBuf,
        entries: Vec<OsString>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            for name in entries {
                let relative = offset.join(&name);
                let from = source.join(&relative);
                let to = destination.join(&relative);

                match self.entry_kind(&from).await? {
                    EntryKind::Directory => {
                        let children = self.entries(&from).await?;
                        self.fs
                            .create_dir(&to)
                            .await
                            .map_err(|e| TreeError::io(FsOp::CreateDir, &to, e))?;
                        debug!(path = %to.display(), "created directory");
                        self.copy_level(source, destination, relative, children)
                            .await?;
                    }
                    EntryKind::RegularFile => {
                        let bytes = self
                            .fs
                            .copy_file_exclusive(&from, &to)
                            .await
                            .map_err(|e| TreeError::io(FsOp::CopyFile, &from, e))?;
                        debug!(path = %to.display(), bytes, "copied file");
                    }
                    EntryKind::Other => self.notifier.skipped_entry(&from),
                }
            }
            Ok(())
        })
    }
}
