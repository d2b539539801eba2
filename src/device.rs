//! Block device abstraction and the transactional overlay on top of it.
//!
//! The filesystem engine never assumes a particular storage backing: it only
//! ever talks to a [`BlockDevice`]. [`FileDevice`] backs the `ds3*` binaries
//! with a disk image on the host filesystem; [`MemDevice`] backs the test
//! suite. [`Transaction`] wraps either one to give the `beginTransaction` /
//! `commit` / `rollback` bracket the engine relies on for atomicity.

use crate::BLOCK_SIZE;
use crate::error::FsError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Builds the I/O error raised when a block index falls outside the device.
fn out_of_range(block_no: u32) -> FsError {
    FsError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("block {block_no} is out of range"),
    ))
}

/// A random-access store of fixed-size blocks.
pub trait BlockDevice {
    /// Fills `buf` with the contents of block `block_no`.
    fn read_block(&mut self, block_no: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), FsError>;

    /// Persists `buf` as the contents of block `block_no`.
    fn write_block(&mut self, block_no: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), FsError>;
}

/// An in-memory block device, used by tests.
#[derive(Default)]
pub struct MemDevice {
    blocks: Vec<[u8; BLOCK_SIZE]>,
}

impl MemDevice {
    /// Creates a device of `block_count` zeroed blocks.
    pub fn new(block_count: u32) -> Self {
        Self {
            blocks: vec![[0u8; BLOCK_SIZE]; block_count as usize],
        }
    }

    /// The number of blocks backing this device.
    pub fn block_count(&self) -> u32 {
        self.blocks.len() as u32
    }
}

impl BlockDevice for MemDevice {
    fn read_block(&mut self, block_no: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), FsError> {
        let block = self
            .blocks
            .get(block_no as usize)
            .ok_or_else(|| out_of_range(block_no))?;
        buf.copy_from_slice(block);
        Ok(())
    }

    fn write_block(&mut self, block_no: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), FsError> {
        let block = self
            .blocks
            .get_mut(block_no as usize)
            .ok_or_else(|| out_of_range(block_no))?;
        block.copy_from_slice(buf);
        Ok(())
    }
}

/// A block device backed by a disk image file.
pub struct FileDevice {
    file: File,
}

impl FileDevice {
    /// Wraps an already-open file as a block device.
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

impl BlockDevice for FileDevice {
    fn read_block(&mut self, block_no: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), FsError> {
        self.file
            .seek(SeekFrom::Start(block_no as u64 * BLOCK_SIZE as u64))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&mut self, block_no: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), FsError> {
        self.file
            .seek(SeekFrom::Start(block_no as u64 * BLOCK_SIZE as u64))?;
        self.file.write_all(buf)?;
        Ok(())
    }
}

/// Brackets a batch of block writes so that they become durable as a whole,
/// or not at all.
///
/// Reads and writes issued through the transaction are staged in an
/// in-memory overlay; reads fall through to the wrapped device for any
/// block not yet staged. [`Transaction::commit`] flushes the overlay to the
/// device; [`Transaction::rollback`], or simply dropping the transaction
/// without committing, discards it instead.
///
/// This mirrors the complement/discard-on-drop shape of
/// `MemSpaceTransaction` in the Maestro kernel, simplified because buffering
/// the whole new block (rather than just a diff against the old one) is
/// cheap at this scale.
#[must_use = "a transaction must be committed, or its writes are discarded"]
pub struct Transaction<'d, D: BlockDevice> {
    device: &'d mut D,
    overlay: HashMap<u32, [u8; BLOCK_SIZE]>,
    resolved: bool,
}

impl<'d, D: BlockDevice> Transaction<'d, D> {
    /// Begins a new transaction over `device`.
    pub fn begin(device: &'d mut D) -> Self {
        Self {
            device,
            overlay: HashMap::new(),
            resolved: false,
        }
    }

    /// Flushes every staged write to the underlying device.
    pub fn commit(mut self) -> Result<(), FsError> {
        for (block_no, buf) in self.overlay.drain() {
            self.device.write_block(block_no, &buf)?;
        }
        self.resolved = true;
        Ok(())
    }

    /// Discards every staged write. The underlying device is left exactly
    /// as it was before the transaction began.
    pub fn rollback(mut self) {
        self.overlay.clear();
        self.resolved = true;
    }
}

impl<'d, D: BlockDevice> BlockDevice for Transaction<'d, D> {
    fn read_block(&mut self, block_no: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<(), FsError> {
        if let Some(staged) = self.overlay.get(&block_no) {
            buf.copy_from_slice(staged);
            Ok(())
        } else {
            self.device.read_block(block_no, buf)
        }
    }

    fn write_block(&mut self, block_no: u32, buf: &[u8; BLOCK_SIZE]) -> Result<(), FsError> {
        self.overlay.insert(block_no, *buf);
        Ok(())
    }
}

impl<'d, D: BlockDevice> Drop for Transaction<'d, D> {
    fn drop(&mut self) {
        if !self.resolved {
            self.overlay.clear();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mem_device_round_trip() {
        let mut dev = MemDevice::new(4);
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0xab;
        dev.write_block(2, &buf).unwrap();
        let mut out = [0u8; BLOCK_SIZE];
        dev.read_block(2, &mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn transaction_commit_is_visible_after() {
        let mut dev = MemDevice::new(4);
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0x42;
        {
            let mut txn = Transaction::begin(&mut dev);
            txn.write_block(1, &buf).unwrap();
            // Reads within the transaction see the staged value.
            let mut out = [0u8; BLOCK_SIZE];
            txn.read_block(1, &mut out).unwrap();
            assert_eq!(out, buf);
            txn.commit().unwrap();
        }
        let mut out = [0u8; BLOCK_SIZE];
        dev.read_block(1, &mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn transaction_rollback_leaves_device_untouched() {
        let mut dev = MemDevice::new(4);
        let original = [0u8; BLOCK_SIZE];
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0x42;
        {
            let mut txn = Transaction::begin(&mut dev);
            txn.write_block(1, &buf).unwrap();
            txn.rollback();
        }
        let mut out = [0u8; BLOCK_SIZE];
        dev.read_block(1, &mut out).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn dropping_an_uncommitted_transaction_rolls_back() {
        let mut dev = MemDevice::new(4);
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0] = 0x42;
        {
            let mut txn = Transaction::begin(&mut dev);
            txn.write_block(1, &buf).unwrap();
        }
        let mut out = [0u8; BLOCK_SIZE];
        dev.read_block(1, &mut out).unwrap();
        assert_eq!(out, [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn file_device_round_trip_survives_reopening() {
        let path = std::env::temp_dir().join(format!("ufs-device-test-{}.img", std::process::id()));
        {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .read(true)
                .write(true)
                .open(&path)
                .unwrap();
            file.set_len(4 * BLOCK_SIZE as u64).unwrap();
            let mut dev = FileDevice::new(file);
            let mut buf = [0u8; BLOCK_SIZE];
            buf[10] = 0x7a;
            dev.write_block(3, &buf).unwrap();
        }
        {
            let file = std::fs::OpenOptions::new().read(true).write(true).open(&path).unwrap();
            let mut dev = FileDevice::new(file);
            let mut out = [0u8; BLOCK_SIZE];
            dev.read_block(3, &mut out).unwrap();
            assert_eq!(out[10], 0x7a);
        }
        std::fs::remove_file(&path).unwrap();
    }
}
