//! The on-disk layout: the superblock, and the block-granular codecs for
//! the bitmap and inode-table regions that sit after it.
//!
//! Region order on disk, contiguous and block-aligned, starting at block 0:
//! superblock, inode bitmap, data bitmap, inode table, data. Every write
//! here is block-granular: to patch one inode or one bitmap byte, the
//! containing block is read, the record patched at its computed offset,
//! and the whole block written back — never a sub-block write.

use crate::device::BlockDevice;
use crate::error::FsError;
use crate::inode::{Inode, INODE_SIZE};
use crate::BLOCK_SIZE;

/// Number of `u32` fields packed into the superblock.
const SB_FIELD_COUNT: usize = 10;
/// Size in bytes of the packed superblock fields (the rest of block 0 is
/// zero padding).
const SB_BYTES: usize = SB_FIELD_COUNT * 4;

/// The filesystem's layout descriptor, stored at block 0.
///
/// Immutable after the filesystem is created; nothing in this crate ever
/// mutates a `Superblock` in place once it has been written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superblock {
    pub inode_bitmap_addr: u32,
    pub inode_bitmap_len: u32,
    pub data_bitmap_addr: u32,
    pub data_bitmap_len: u32,
    pub inode_region_addr: u32,
    pub inode_region_len: u32,
    pub num_inodes: u32,
    pub num_data: u32,
    pub data_region_addr: u32,
    pub data_region_len: u32,
}

impl Superblock {
    /// Serializes the superblock's fields into block 0's contents.
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut buf = [0u8; BLOCK_SIZE];
        let fields = [
            self.inode_bitmap_addr,
            self.inode_bitmap_len,
            self.data_bitmap_addr,
            self.data_bitmap_len,
            self.inode_region_addr,
            self.inode_region_len,
            self.num_inodes,
            self.num_data,
            self.data_region_addr,
            self.data_region_len,
        ];
        for (i, field) in fields.iter().enumerate() {
            let off = i * 4;
            buf[off..off + 4].copy_from_slice(&field.to_le_bytes());
        }
        buf
    }

    /// Parses block 0's contents into a superblock.
    pub fn from_bytes(buf: &[u8; BLOCK_SIZE]) -> Self {
        let mut f = [0u32; SB_FIELD_COUNT];
        for (i, slot) in f.iter_mut().enumerate() {
            let off = i * 4;
            *slot = u32::from_le_bytes(buf[off..off + 4].try_into().unwrap());
        }
        Self {
            inode_bitmap_addr: f[0],
            inode_bitmap_len: f[1],
            data_bitmap_addr: f[2],
            data_bitmap_len: f[3],
            inode_region_addr: f[4],
            inode_region_len: f[5],
            num_inodes: f[6],
            num_data: f[7],
            data_region_addr: f[8],
            data_region_len: f[9],
        }
    }

    /// The number of inodes packed into one block of the inode table,
    /// truncated towards zero.
    pub fn inodes_per_block() -> u32 {
        (BLOCK_SIZE / INODE_SIZE) as u32
    }

    /// The physical capacity of the inode table in slots, independent of
    /// the logical `num_inodes` the superblock declares.
    fn inode_region_capacity(&self) -> u32 {
        self.inode_region_len * Self::inodes_per_block()
    }
}

/// Reads the superblock from block 0.
pub fn read_superblock(dev: &mut impl BlockDevice) -> Result<Superblock, FsError> {
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(0, &mut buf)?;
    Ok(Superblock::from_bytes(&buf))
}

/// Writes the superblock to block 0, zeroing the rest of the block.
pub fn write_superblock(dev: &mut impl BlockDevice, sb: &Superblock) -> Result<(), FsError> {
    dev.write_block(0, &sb.to_bytes())
}

/// Reads an entire bitmap region (`len` contiguous blocks starting at
/// `addr`) into one contiguous byte buffer.
pub fn read_bitmap_region(
    dev: &mut impl BlockDevice,
    addr: u32,
    len: u32,
) -> Result<Vec<u8>, FsError> {
    let mut out = Vec::with_capacity(len as usize * BLOCK_SIZE);
    let mut buf = [0u8; BLOCK_SIZE];
    for i in 0..len {
        dev.read_block(addr + i, &mut buf)?;
        out.extend_from_slice(&buf);
    }
    Ok(out)
}

/// Writes a bitmap buffer back to its region, block by block. `bitmap`'s
/// length must be an exact multiple of the block size.
pub fn write_bitmap_region(
    dev: &mut impl BlockDevice,
    addr: u32,
    bitmap: &[u8],
) -> Result<(), FsError> {
    debug_assert_eq!(bitmap.len() % BLOCK_SIZE, 0);
    for (i, chunk) in bitmap.chunks(BLOCK_SIZE).enumerate() {
        let mut buf = [0u8; BLOCK_SIZE];
        buf.copy_from_slice(chunk);
        dev.write_block(addr + i as u32, &buf)?;
    }
    Ok(())
}

/// Computes the (block, offset) an inode lives at within the inode table.
fn inode_location(sb: &Superblock, inum: u32) -> (u32, usize) {
    let k = Superblock::inodes_per_block();
    let block = sb.inode_region_addr + inum / k;
    let offset = (inum % k) as usize * INODE_SIZE;
    (block, offset)
}

/// Reads the inode at index `inum` out of the inode table.
///
/// This only checks the inode table's *physical* capacity; the logical
/// bound `num_inodes`, and whether the slot's type is actually allocated,
/// are the engine's concern.
pub fn read_inode(dev: &mut impl BlockDevice, sb: &Superblock, inum: u32) -> Result<Inode, FsError> {
    if inum >= sb.inode_region_capacity() {
        return Err(FsError::InvalidInode);
    }
    let (block, offset) = inode_location(sb, inum);
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(block, &mut buf)?;
    Ok(Inode::from_bytes(&buf[offset..offset + INODE_SIZE]))
}

/// Patches the inode at index `inum` in place: reads the containing block,
/// overwrites only this inode's bytes, and writes the block back — so an
/// unrelated inode packed into the same block is never clobbered.
pub fn write_inode(
    dev: &mut impl BlockDevice,
    sb: &Superblock,
    inum: u32,
    inode: &Inode,
) -> Result<(), FsError> {
    if inum >= sb.inode_region_capacity() {
        return Err(FsError::InvalidInode);
    }
    let (block, offset) = inode_location(sb, inum);
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(block, &mut buf)?;
    buf[offset..offset + INODE_SIZE].copy_from_slice(&inode.to_bytes());
    dev.write_block(block, &buf)
}
