//! UFS — a small UNIX-style filesystem layered over a fixed-size block
//! device.
//!
//! The crate is a library (this module and its children) plus seven thin
//! `ds3*` binaries under `src/bin/` that expose the engine from the command
//! line. The library never opens a disk image itself and never decides when
//! a transaction begins or ends; callers (the binaries, or a test) own the
//! [`device::BlockDevice`] and the [`device::Transaction`] bracketing any
//! mutating call.

pub mod bitmap;
pub mod cli;
pub mod device;
pub mod dirent;
pub mod error;
pub mod fs;
pub mod inode;
pub mod layout;

/// Size in bytes of one block, and the unit of every device I/O.
pub const BLOCK_SIZE: usize = 4096;

/// Number of direct block pointers an inode holds. Files have no indirect
/// blocks, so this also bounds the maximum file size.
pub const DIRECT_PTRS: usize = 30;

/// Maximum length in bytes, including the terminating NUL, of a directory
/// entry's name.
pub const DIR_ENT_NAME_SIZE: usize = 28;

pub use device::{BlockDevice, FileDevice, MemDevice, Transaction};
pub use dirent::DirectoryEntry;
pub use error::FsError;
pub use fs::FileSystem;
pub use inode::{Inode, InodeType};
pub use layout::Superblock;
