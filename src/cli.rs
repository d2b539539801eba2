//! Shared plumbing for the `ds3*` binaries under `src/bin/`: the
//! error-and-exit convention and absolute-path resolution.
//!
//! Path parsing is deliberately kept out of the engine (`lookup` only ever
//! takes a single path component); `resolve_with_parent` is the one place
//! that walks a `/`-separated path by repeated `lookup` calls, for the
//! benefit of `ds3ls`.

use crate::device::BlockDevice;
use crate::error::FsError;
use crate::fs::FileSystem;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::exit;

/// The root directory's inode number.
pub const ROOT_INODE: u32 = 0;

/// Writes `{bin}: error: {msg}` to stderr and exits with status 1.
pub fn error<M: fmt::Display>(bin: &str, msg: M) -> ! {
    eprintln!("{bin}: error: {msg}");
    exit(1);
}

/// Opens a disk image for reading and writing, exiting on failure.
pub fn open_device(bin: &str, path: &Path) -> crate::device::FileDevice {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .unwrap_or_else(|e| error(bin, format_args!("cannot open `{}`: {e}", path.display())));
    crate::device::FileDevice::new(file)
}

/// Resolves an absolute, `/`-separated path to its inode number, returning
/// both that inode and the parent directory it was found in (the parent of
/// the root is the root itself).
pub fn resolve_with_parent<D: BlockDevice>(
    fs: &mut FileSystem<'_, D>,
    path: &str,
) -> Result<(u32, u32), FsError> {
    if !path.starts_with('/') {
        return Err(FsError::NotFound);
    }
    let mut parent = ROOT_INODE;
    let mut inum = ROOT_INODE;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        parent = inum;
        inum = fs.lookup(inum, segment)?;
    }
    Ok((parent, inum))
}
