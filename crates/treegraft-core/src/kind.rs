//! Directory entry classification.

use std::fs::{FileType, Metadata};

use serde::{Deserialize, Serialize};

/// What kind of filesystem object lives at a path.
///
/// Always derived from a stat that does not follow symbolic links, so a
/// link is [`EntryKind::Other`] no matter what it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    RegularFile,
    /// Anything else: symlinks, sockets, fifos, devices.
    Other,
}

impl EntryKind {
    /// Classify a file type obtained from `symlink_metadata`.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::RegularFile
        } else {
            Self::Other
        }
    }

    /// Classify metadata obtained from `symlink_metadata`.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::from_file_type(metadata.file_type())
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::RegularFile)
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Directory => "directory",
            Self::RegularFile => "regular file",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}
