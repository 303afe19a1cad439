//! Filesystem capability consumed by the tree walkers.

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::Path;
use std::pin::Pin;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use treegraft_core::EntryKind;

/// Boxed, sendable future used for recursive traversal.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The filesystem calls the walkers need, and nothing more.
///
/// Errors are plain [`io::Error`]s; callers attach operation and path
/// context.
pub trait Filesystem: Send + Sync {
    /// Classify the object at `path` without following symbolic links.
    fn entry_kind(&self, path: &Path) -> impl Future<Output = io::Result<EntryKind>> + Send;

    /// List the names in directory `path`, in the order the system returns them.
    fn list_dir(&self, path: &Path) -> impl Future<Output = io::Result<Vec<OsString>>> + Send;

    /// Create a single directory. Fails if it exists or its parent does not.
    fn create_dir(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Copy a regular file, failing rather than overwriting `destination`.
    ///
    /// Returns the number of bytes copied.
    fn copy_file_exclusive(
        &self,
        source: &Path,
        destination: &Path,
    ) -> impl Future<Output = io::Result<u64>> + Send;

    /// Remove a non-directory object.
    fn remove_file(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// [`Filesystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

impl Filesystem for TokioFs {
    async fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = fs::symlink_metadata(path).await?;
        Ok(EntryKind::from_metadata(&metadata))
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path).await
    }

    async fn copy_file_exclusive(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let mut reader = fs::File::open(source).await?;
        let permissions = reader.metadata().await?.permissions();

        let mut writer = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await?;
        let bytes = tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        writer.set_permissions(permissions).await?;

        Ok(bytes)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path).await
    }
}
