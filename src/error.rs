//! The error type returned by every engine operation.

use std::io;
use thiserror::Error;

/// Every way a [`crate::fs::FileSystem`] operation can fail.
///
/// Variants are non-overlapping: exactly one applies to any given failure.
#[derive(Error, Debug)]
pub enum FsError {
    /// The inode index is out of range, its bit is unset, or its on-disk
    /// type is neither directory nor regular file.
    #[error("invalid inode")]
    InvalidInode,
    /// The requested type is not allowed for the operation (writing to a
    /// directory, `create` with a mismatched type, ...).
    #[error("invalid type")]
    InvalidType,
    /// A negative size was given, or the size exceeds what direct pointers
    /// can address.
    #[error("invalid size")]
    InvalidSize,
    /// A name is empty or does not fit in a directory entry.
    #[error("invalid name")]
    InvalidName,
    /// `lookup` or `unlink` could not find the requested entry.
    #[error("not found")]
    NotFound,
    /// No free bit was available in the relevant bitmap.
    #[error("no space left on device")]
    NoSpace,
    /// A directory other than `.`/`..` still has entries.
    #[error("directory not empty")]
    DirectoryNotEmpty,
    /// The name refers to `.` or `..`.
    #[error("unlink not allowed on `.` or `..`")]
    UnlinkNotAllowed,
    /// The underlying block device failed to read or write.
    #[error("disk I/O error: {0}")]
    Io(#[from] io::Error),
}
