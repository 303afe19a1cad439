//! Error types for tree operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout treegraft.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// The filesystem call that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsOp {
    /// Non-following stat.
    Stat,
    /// Directory listing.
    ListDir,
    /// Single directory creation.
    CreateDir,
    /// Exclusive file copy.
    CopyFile,
    /// File (or non-directory) removal.
    RemoveFile,
    /// Empty directory removal.
    RemoveDir,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Self::Stat => "stat",
            Self::ListDir => "list directory",
            Self::CreateDir => "create directory",
            Self::CopyFile => "copy file",
            Self::RemoveFile => "remove file",
            Self::RemoveDir => "remove directory",
        };
        f.write_str(verb)
    }
}

/// Coarse error taxonomy callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing, empty, or malformed input to a public entry point.
    InvalidArgument,
    /// A required path or parent directory does not exist.
    NotFound,
    /// A path the operation meant to create is already occupied.
    AlreadyExists,
    /// Tried to remove a directory that still has entries.
    NotEmpty,
    /// Tried to remove a directory as a file.
    IsADirectory,
    /// The OS refused access.
    PermissionDenied,
    /// Anything else the OS reported.
    Other,
}

impl From<std::io::ErrorKind> for ErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind as Io;
        match kind {
            Io::NotFound => Self::NotFound,
            Io::AlreadyExists => Self::AlreadyExists,
            Io::DirectoryNotEmpty => Self::NotEmpty,
            Io::IsADirectory => Self::IsADirectory,
            Io::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

/// Errors that can occur during graft, prune, and file removal.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A public entry point was called with unusable input.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A filesystem call failed.
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Graft failed and removing the partial copy failed too.
    #[error("{original} (rollback also failed: {cleanup})")]
    RollbackFailed {
        original: Box<TreeError>,
        cleanup: Box<TreeError>,
    },
}

impl TreeError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an error for an empty required argument.
    pub fn empty_argument(name: &str) -> Self {
        Self::invalid_argument(format!("{name} argument must not be empty"))
    }

    /// Create an I/O error with operation and path context.
    pub fn io(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Combine a failure with the failure of its cleanup.
    pub fn rollback_failed(original: TreeError, cleanup: TreeError) -> Self {
        Self::RollbackFailed {
            original: Box::new(original),
            cleanup: Box::new(cleanup),
        }
    }

    /// Classify this error.
    ///
    /// A failed rollback reports the kind of the error that triggered it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Io { source, .. } => source.kind().into(),
            Self::RollbackFailed { original, .. } => original.kind(),
        }
    }

    /// The path the failing call was made on, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidArgument { .. } => None,
            Self::Io { path, .. } => Some(path),
            Self::RollbackFailed { original, .. } => original.path(),
        }
    }

    /// The underlying OS error, if any.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::RollbackFailed { original, .. } => original.io_error(),
            Self::InvalidArgument { .. } => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
