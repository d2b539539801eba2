//! The filesystem engine: `stat`, `lookup`, `read`, `write`, `create`,
//! `unlink`.
//!
//! Every operation reads the superblock, loads whichever inodes and
//! bitmaps it needs, stages every change in memory, and only then issues
//! writes through the [`BlockDevice`] — so a failure partway through
//! validation or allocation never touches disk. Callers (the `ds3*`
//! binaries, or a test) are responsible for bracketing mutating calls in a
//! [`crate::device::Transaction`]; the engine itself never opens one.

use crate::bitmap;
use crate::device::BlockDevice;
use crate::dirent::{DirectoryEntry, DIR_ENT_SIZE};
use crate::error::FsError;
use crate::inode::{Inode, InodeType};
use crate::layout::{self, Superblock};
use crate::{BLOCK_SIZE, DIRECT_PTRS, DIR_ENT_NAME_SIZE};

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// The maximum number of bytes a file or directory's content can occupy:
/// one block per direct pointer, no indirect blocks.
pub const MAX_CONTENT_SIZE: usize = DIRECT_PTRS * BLOCK_SIZE;

/// A handle to a filesystem living on a [`BlockDevice`].
///
/// Borrows the device for as long as it is in use; nothing here owns or
/// opens the underlying storage.
pub struct FileSystem<'a, D: BlockDevice> {
    dev: &'a mut D,
}

impl<'a, D: BlockDevice> FileSystem<'a, D> {
    /// Wraps a device (or a [`crate::device::Transaction`] over one) as a
    /// filesystem handle.
    pub fn new(dev: &'a mut D) -> Self {
        Self { dev }
    }

    /// Loads inode `inum`, failing with [`FsError::InvalidInode`] if the
    /// index is out of the filesystem's logical range or the slot is not
    /// an allocated directory or regular file.
    ///
    /// The inode bitmap bit is tied one-to-one to the record's type, so
    /// checking the type here is equivalent to, and cheaper than, also
    /// consulting the bitmap.
    fn load_valid_inode(&mut self, sb: &Superblock, inum: u32) -> Result<Inode, FsError> {
        if inum >= sb.num_inodes {
            return Err(FsError::InvalidInode);
        }
        let inode = layout::read_inode(self.dev, sb, inum)?;
        if inode.kind().is_none() {
            return Err(FsError::InvalidInode);
        }
        Ok(inode)
    }

    /// Copies up to `size` bytes of `inode`'s content into `buf`, stopping
    /// early at a zero direct pointer. Shared by the public `read` and the
    /// engine's internal directory scans.
    fn read_content(&mut self, inode: &Inode, buf: &mut [u8], size: usize) -> Result<usize, FsError> {
        let effective = size.min(inode.size as usize).min(MAX_CONTENT_SIZE).min(buf.len());
        let mut bytes_read = 0;
        for &block_no in inode.direct.iter() {
            if bytes_read >= effective {
                break;
            }
            if block_no == 0 {
                break;
            }
            let mut block = [0u8; BLOCK_SIZE];
            self.dev.read_block(block_no, &mut block)?;
            let n = (effective - bytes_read).min(BLOCK_SIZE);
            buf[bytes_read..bytes_read + n].copy_from_slice(&block[..n]);
            bytes_read += n;
        }
        Ok(bytes_read)
    }

    /// Scans a directory's entries for `name`, returning the matching entry
    /// together with its byte offset within the directory's content.
    ///
    /// Tombstone entries ([`DirectoryEntry::is_tombstone`]) are skipped;
    /// this engine never produces one, but tolerates one on read.
    fn find_entry(
        &mut self,
        dir: &Inode,
        name: &str,
    ) -> Result<Option<(DirectoryEntry, usize)>, FsError> {
        let size = dir.size as usize;
        let mut content = vec![0u8; size];
        self.read_content(dir, &mut content, size)?;
        for (i, chunk) in content.chunks(DIR_ENT_SIZE).enumerate() {
            let entry = DirectoryEntry::from_bytes(chunk);
            if !entry.is_tombstone() && entry.name() == name {
                return Ok(Some((entry, i * DIR_ENT_SIZE)));
            }
        }
        Ok(None)
    }

    /// Returns a copy of inode `inum`'s record.
    pub fn stat(&mut self, inum: u32) -> Result<Inode, FsError> {
        let sb = layout::read_superblock(self.dev)?;
        self.load_valid_inode(&sb, inum)
    }

    /// Resolves `name` within directory `parent`, returning its inode
    /// number. An empty `name` is simply a miss, not a distinct error.
    pub fn lookup(&mut self, parent: u32, name: &str) -> Result<u32, FsError> {
        let sb = layout::read_superblock(self.dev)?;
        let parent_inode = self.load_valid_inode(&sb, parent)?;
        if parent_inode.kind() != Some(InodeType::Directory) {
            return Err(FsError::InvalidInode);
        }
        self.find_entry(&parent_inode, name)?
            .map(|(entry, _)| entry.inum as u32)
            .ok_or(FsError::NotFound)
    }

    /// Copies up to `size` bytes of inode `inum`'s content into `buf`,
    /// returning the number of bytes actually copied. Reading past the end
    /// of the file is silently truncated to `inode.size`.
    pub fn read(&mut self, inum: u32, buf: &mut [u8], size: usize) -> Result<usize, FsError> {
        let sb = layout::read_superblock(self.dev)?;
        let inode = self.load_valid_inode(&sb, inum)?;
        self.read_content(&inode, buf, size)
    }

    /// Replaces inode `inum`'s entire content with `buf[..size]`, growing or
    /// shrinking its data blocks as needed.
    pub fn write(&mut self, inum: u32, buf: &[u8], size: usize) -> Result<usize, FsError> {
        let sb = layout::read_superblock(self.dev)?;
        let mut inode = self.load_valid_inode(&sb, inum)?;
        if inode.kind() != Some(InodeType::RegularFile) {
            return Err(FsError::InvalidType);
        }
        if size > MAX_CONTENT_SIZE {
            return Err(FsError::InvalidSize);
        }

        let mut data_bitmap = layout::read_bitmap_region(self.dev, sb.data_bitmap_addr, sb.data_bitmap_len)?;

        let required = ceil_div(size, BLOCK_SIZE);
        let current = ceil_div(inode.size as usize, BLOCK_SIZE);

        if required < current {
            for slot in inode.direct[required..current].iter_mut() {
                bitmap::free(&mut data_bitmap, *slot - sb.data_region_addr);
                *slot = 0;
            }
        } else if required > current {
            for i in current..required {
                let j = bitmap::allocate(&mut data_bitmap, sb.num_data).ok_or(FsError::NoSpace)?;
                inode.direct[i] = sb.data_region_addr + j;
            }
        }

        let mut blocks = Vec::with_capacity(required);
        for i in 0..required {
            let mut block = [0u8; BLOCK_SIZE];
            let start = i * BLOCK_SIZE;
            let end = ((i + 1) * BLOCK_SIZE).min(size);
            block[..end - start].copy_from_slice(&buf[start..end]);
            blocks.push((inode.direct[i], block));
        }

        inode.size = size as u32;

        layout::write_bitmap_region(self.dev, sb.data_bitmap_addr, &data_bitmap)?;
        layout::write_inode(self.dev, &sb, inum, &inode)?;
        for (block_no, block) in blocks {
            self.dev.write_block(block_no, &block)?;
        }

        Ok(size)
    }

    /// Creates `name` in directory `parent` as a new inode of type `kind`,
    /// returning its inode number. Re-creating an existing entry of the
    /// same type is idempotent; of a different type, it is
    /// [`FsError::InvalidType`].
    pub fn create(&mut self, parent: u32, kind: InodeType, name: &str) -> Result<u32, FsError> {
        if name.is_empty() || name.len() >= DIR_ENT_NAME_SIZE {
            return Err(FsError::InvalidName);
        }
        let sb = layout::read_superblock(self.dev)?;
        let mut parent_inode = self.load_valid_inode(&sb, parent)?;
        if parent_inode.kind() != Some(InodeType::Directory) {
            return Err(FsError::InvalidInode);
        }

        if let Some((existing, _)) = self.find_entry(&parent_inode, name)? {
            let existing_inode = self.load_valid_inode(&sb, existing.inum as u32)?;
            return if existing_inode.kind() == Some(kind) {
                Ok(existing.inum as u32)
            } else {
                Err(FsError::InvalidType)
            };
        }

        let mut inode_bitmap = layout::read_bitmap_region(self.dev, sb.inode_bitmap_addr, sb.inode_bitmap_len)?;
        let new_inum = bitmap::allocate(&mut inode_bitmap, sb.num_inodes).ok_or(FsError::NoSpace)?;

        let mut data_bitmap = layout::read_bitmap_region(self.dev, sb.data_bitmap_addr, sb.data_bitmap_len)?;

        let mut new_inode = Inode::new(kind);
        let mut new_dir_block = None;
        if kind == InodeType::Directory {
            let j = bitmap::allocate(&mut data_bitmap, sb.num_data).ok_or(FsError::NoSpace)?;
            let block_no = sb.data_region_addr + j;
            let mut block = [0u8; BLOCK_SIZE];
            let dot = DirectoryEntry::new(".", new_inum as i32);
            let dotdot = DirectoryEntry::new("..", parent as i32);
            block[..DIR_ENT_SIZE].copy_from_slice(&dot.to_bytes());
            block[DIR_ENT_SIZE..2 * DIR_ENT_SIZE].copy_from_slice(&dotdot.to_bytes());
            new_inode.direct[0] = block_no;
            new_inode.size = (2 * DIR_ENT_SIZE) as u32;
            new_dir_block = Some((block_no, block));
        }

        // Append the new directory entry to the parent, allocating another
        // data block first if it does not fit in the current last one.
        let entry_offset = parent_inode.size as usize;
        let block_idx = entry_offset / BLOCK_SIZE;
        let offset_in_block = entry_offset % BLOCK_SIZE;
        if block_idx >= DIRECT_PTRS {
            return Err(FsError::NoSpace);
        }

        let needs_new_block = parent_inode.direct[block_idx] == 0;
        let parent_block_no = if needs_new_block {
            let j = bitmap::allocate(&mut data_bitmap, sb.num_data).ok_or(FsError::NoSpace)?;
            let block_no = sb.data_region_addr + j;
            parent_inode.direct[block_idx] = block_no;
            block_no
        } else {
            parent_inode.direct[block_idx]
        };

        let mut parent_block = [0u8; BLOCK_SIZE];
        if !needs_new_block {
            self.dev.read_block(parent_block_no, &mut parent_block)?;
        }
        let new_entry = DirectoryEntry::new(name, new_inum as i32);
        parent_block[offset_in_block..offset_in_block + DIR_ENT_SIZE].copy_from_slice(&new_entry.to_bytes());
        parent_inode.size += DIR_ENT_SIZE as u32;

        layout::write_bitmap_region(self.dev, sb.inode_bitmap_addr, &inode_bitmap)?;
        layout::write_bitmap_region(self.dev, sb.data_bitmap_addr, &data_bitmap)?;
        layout::write_inode(self.dev, &sb, new_inum, &new_inode)?;
        layout::write_inode(self.dev, &sb, parent, &parent_inode)?;
        self.dev.write_block(parent_block_no, &parent_block)?;
        if let Some((block_no, block)) = new_dir_block {
            self.dev.write_block(block_no, &block)?;
        }

        Ok(new_inum)
    }

    /// Removes `name` from directory `parent`, freeing the target inode and
    /// all of its data blocks. Fails with [`FsError::DirectoryNotEmpty`] if
    /// the target is a directory holding more than `.`/`..`.
    pub fn unlink(&mut self, parent: u32, name: &str) -> Result<(), FsError> {
        if name.is_empty() || name.len() >= DIR_ENT_NAME_SIZE {
            return Err(FsError::InvalidName);
        }
        if name == "." || name == ".." {
            return Err(FsError::UnlinkNotAllowed);
        }

        let sb = layout::read_superblock(self.dev)?;
        let mut parent_inode = self.load_valid_inode(&sb, parent)?;
        if parent_inode.kind() != Some(InodeType::Directory) {
            return Err(FsError::InvalidInode);
        }

        let (target_entry, target_offset) =
            self.find_entry(&parent_inode, name)?.ok_or(FsError::NotFound)?;
        let target_inum = target_entry.inum as u32;
        let mut target_inode = self.load_valid_inode(&sb, target_inum)?;

        let entry_size = DIR_ENT_SIZE as u32;
        if target_inode.kind() == Some(InodeType::Directory) && target_inode.size > 2 * entry_size {
            return Err(FsError::DirectoryNotEmpty);
        }

        let mut inode_bitmap = layout::read_bitmap_region(self.dev, sb.inode_bitmap_addr, sb.inode_bitmap_len)?;
        let mut data_bitmap = layout::read_bitmap_region(self.dev, sb.data_bitmap_addr, sb.data_bitmap_len)?;

        let target_blocks = ceil_div(target_inode.size as usize, BLOCK_SIZE);
        for slot in target_inode.direct[..target_blocks].iter_mut() {
            bitmap::free(&mut data_bitmap, *slot - sb.data_region_addr);
            *slot = 0;
        }
        bitmap::free(&mut inode_bitmap, target_inum);

        // Swap-with-last: overwrite the removed slot with the directory's
        // last entry, then shrink. `lookup` never depends on insertion
        // order, so this is safe.
        let last_offset = parent_inode.size as usize - DIR_ENT_SIZE;
        let last_block_idx = last_offset / BLOCK_SIZE;
        let last_offset_in_block = last_offset % BLOCK_SIZE;
        let last_block_no = parent_inode.direct[last_block_idx];

        let mut last_block = [0u8; BLOCK_SIZE];
        self.dev.read_block(last_block_no, &mut last_block)?;
        let last_entry_bytes: [u8; DIR_ENT_SIZE] = last_block
            [last_offset_in_block..last_offset_in_block + DIR_ENT_SIZE]
            .try_into()
            .unwrap();

        if target_offset != last_offset {
            let target_block_idx = target_offset / BLOCK_SIZE;
            let target_offset_in_block = target_offset % BLOCK_SIZE;
            let target_block_no = parent_inode.direct[target_block_idx];
            let mut target_block = if target_block_no == last_block_no {
                last_block
            } else {
                let mut b = [0u8; BLOCK_SIZE];
                self.dev.read_block(target_block_no, &mut b)?;
                b
            };
            target_block[target_offset_in_block..target_offset_in_block + DIR_ENT_SIZE]
                .copy_from_slice(&last_entry_bytes);
            self.dev.write_block(target_block_no, &target_block)?;
        }

        parent_inode.size -= DIR_ENT_SIZE as u32;
        if last_offset_in_block == 0 {
            bitmap::free(&mut data_bitmap, last_block_no - sb.data_region_addr);
            parent_inode.direct[last_block_idx] = 0;
        }

        layout::write_bitmap_region(self.dev, sb.inode_bitmap_addr, &inode_bitmap)?;
        layout::write_bitmap_region(self.dev, sb.data_bitmap_addr, &data_bitmap)?;
        layout::write_inode(self.dev, &sb, parent, &parent_inode)?;
        layout::write_inode(self.dev, &sb, target_inum, &Inode::free())?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::device::MemDevice;

    /// Builds a tiny, freshly "formatted" in-memory filesystem: a root
    /// directory at inode 0, enough inodes and data blocks for the tests
    /// that use it. Mirrors the allocation bookkeeping `mkfs` factories in
    /// the Maestro userland tools perform, scaled down to this layout.
    fn fresh_fs(num_inodes: u32, num_data: u32) -> MemDevice {
        let inode_bitmap_len = 1;
        let data_bitmap_len = 1;
        let inode_region_len = ceil_div(num_inodes as usize, Superblock::inodes_per_block() as usize) as u32;
        let inode_region_addr = 1 + inode_bitmap_len + data_bitmap_len;
        let data_region_addr = inode_region_addr + inode_region_len;

        let sb = Superblock {
            inode_bitmap_addr: 1,
            inode_bitmap_len,
            data_bitmap_addr: 1 + inode_bitmap_len,
            data_bitmap_len,
            inode_region_addr,
            inode_region_len,
            num_inodes,
            num_data,
            data_region_addr,
            data_region_len: num_data,
        };

        let mut dev = MemDevice::new(data_region_addr + num_data);
        layout::write_superblock(&mut dev, &sb).unwrap();

        let mut inode_bitmap = vec![0u8; BLOCK_SIZE * inode_bitmap_len as usize];
        let root_bit = bitmap::allocate(&mut inode_bitmap, num_inodes).unwrap();
        assert_eq!(root_bit, 0);
        layout::write_bitmap_region(&mut dev, sb.inode_bitmap_addr, &inode_bitmap).unwrap();

        let mut data_bitmap = vec![0u8; BLOCK_SIZE * data_bitmap_len as usize];
        let root_block = bitmap::allocate(&mut data_bitmap, num_data).unwrap();
        layout::write_bitmap_region(&mut dev, sb.data_bitmap_addr, &data_bitmap).unwrap();

        let mut root = Inode::new(InodeType::Directory);
        root.direct[0] = sb.data_region_addr + root_block;
        root.size = (2 * DIR_ENT_SIZE) as u32;
        layout::write_inode(&mut dev, &sb, 0, &root).unwrap();

        let mut block = [0u8; BLOCK_SIZE];
        let dot = DirectoryEntry::new(".", 0);
        let dotdot = DirectoryEntry::new("..", 0);
        block[..DIR_ENT_SIZE].copy_from_slice(&dot.to_bytes());
        block[DIR_ENT_SIZE..2 * DIR_ENT_SIZE].copy_from_slice(&dotdot.to_bytes());
        dev.write_block(root.direct[0], &block).unwrap();

        dev
    }

    #[test]
    fn scenario_create_directory_then_lookup_and_stat() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let inum = fs.create(0, InodeType::Directory, "a").unwrap();
        assert_eq!(inum, 1);
        assert_eq!(fs.lookup(0, "a").unwrap(), 1);
        let st = fs.stat(1).unwrap();
        assert_eq!(st.kind(), Some(InodeType::Directory));
        assert_eq!(st.size, (2 * DIR_ENT_SIZE) as u32);
    }

    #[test]
    fn scenario_write_and_read_back_small_file() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let inum = fs.create(0, InodeType::RegularFile, "f").unwrap();
        assert_eq!(fs.write(inum, b"hello", 5).unwrap(), 5);
        let mut buf = [0u8; 5];
        assert_eq!(fs.read(inum, &mut buf, 5).unwrap(), 5);
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn scenario_write_spanning_two_blocks_uses_distinct_data_bits() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let inum = fs.create(0, InodeType::RegularFile, "f").unwrap();
        let data = vec![0u8; 8192];
        assert_eq!(fs.write(inum, &data, 8192).unwrap(), 8192);
        let st = fs.stat(inum).unwrap();
        assert_eq!(st.size, 8192);
        assert_ne!(st.direct[0], 0);
        assert_ne!(st.direct[1], 0);
        assert_ne!(st.direct[0], st.direct[1]);
    }

    #[test]
    fn write_shrinking_a_file_frees_the_surplus_data_blocks() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let inum = fs.create(0, InodeType::RegularFile, "f").unwrap();
        let data = vec![0u8; 8192];
        fs.write(inum, &data, 8192).unwrap();
        let grown = fs.stat(inum).unwrap();
        let freed_block = grown.direct[1];
        assert_ne!(freed_block, 0);

        assert_eq!(fs.write(inum, b"hi", 2).unwrap(), 2);
        let shrunk = fs.stat(inum).unwrap();
        assert_eq!(shrunk.size, 2);
        assert_eq!(shrunk.direct[1], 0);

        let sb = layout::read_superblock(&mut dev).unwrap();
        let data_bitmap =
            layout::read_bitmap_region(&mut dev, sb.data_bitmap_addr, sb.data_bitmap_len).unwrap();
        assert!(!bitmap::is_set(&data_bitmap, freed_block - sb.data_region_addr));

        // The freed bit is available again: a second file can claim it.
        let mut fs = FileSystem::new(&mut dev);
        let other = fs.create(0, InodeType::RegularFile, "g").unwrap();
        let more_data = vec![0u8; 8192];
        fs.write(other, &more_data, 8192).unwrap();
        let other_st = fs.stat(other).unwrap();
        assert!(other_st.direct[0] == freed_block || other_st.direct[1] == freed_block);
    }

    #[test]
    fn scenario_unlink_nonempty_directory_fails() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let d = fs.create(0, InodeType::Directory, "d").unwrap();
        fs.create(d, InodeType::RegularFile, "g").unwrap();
        assert!(matches!(
            fs.unlink(0, "d"),
            Err(FsError::DirectoryNotEmpty)
        ));
        // State is unchanged: "d" is still there and still has "g".
        assert_eq!(fs.lookup(0, "d").unwrap(), d);
        assert_eq!(fs.lookup(d, "g").unwrap(), 2);
    }

    #[test]
    fn scenario_unlink_file_frees_inode_and_data_and_shrinks_parent() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let f = fs.create(0, InodeType::RegularFile, "f").unwrap();
        fs.write(f, b"x", 1).unwrap();
        fs.unlink(0, "f").unwrap();
        assert!(matches!(fs.stat(f), Err(FsError::InvalidInode)));
        let root = fs.stat(0).unwrap();
        assert_eq!(root.size, (2 * DIR_ENT_SIZE) as u32);
        assert!(matches!(fs.lookup(0, "f"), Err(FsError::NotFound)));
    }

    #[test]
    fn scenario_unlink_dot_and_dotdot_is_rejected() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        assert!(matches!(fs.unlink(0, "."), Err(FsError::UnlinkNotAllowed)));
        assert!(matches!(fs.unlink(0, ".."), Err(FsError::UnlinkNotAllowed)));
    }

    #[test]
    fn write_exactly_at_the_size_limit_succeeds_one_more_fails() {
        let mut dev = fresh_fs(64, DIRECT_PTRS as u32 + 2);
        let mut fs = FileSystem::new(&mut dev);
        let f = fs.create(0, InodeType::RegularFile, "f").unwrap();
        let max = vec![0u8; MAX_CONTENT_SIZE];
        assert_eq!(fs.write(f, &max, MAX_CONTENT_SIZE).unwrap(), MAX_CONTENT_SIZE);
        let too_big = vec![0u8; MAX_CONTENT_SIZE + 1];
        assert!(matches!(
            fs.write(f, &too_big, MAX_CONTENT_SIZE + 1),
            Err(FsError::InvalidSize)
        ));
    }

    #[test]
    fn reading_past_end_of_file_is_truncated() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let f = fs.create(0, InodeType::RegularFile, "f").unwrap();
        fs.write(f, b"hi", 2).unwrap();
        let mut buf = [0xffu8; 10];
        let n = fs.read(f, &mut buf, 10).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], b"hi");
    }

    #[test]
    fn create_is_idempotent_for_same_type_and_rejects_mismatched_type() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        let a = fs.create(0, InodeType::Directory, "a").unwrap();
        let a_again = fs.create(0, InodeType::Directory, "a").unwrap();
        assert_eq!(a, a_again);
        assert!(matches!(
            fs.create(0, InodeType::RegularFile, "a"),
            Err(FsError::InvalidType)
        ));
    }

    #[test]
    fn create_fails_when_inode_bitmap_is_full() {
        let mut dev = fresh_fs(1, 64);
        let mut fs = FileSystem::new(&mut dev);
        assert!(matches!(
            fs.create(0, InodeType::RegularFile, "f"),
            Err(FsError::NoSpace)
        ));
    }

    #[test]
    fn lookup_does_not_depend_on_insertion_order_after_swap_removal() {
        let mut dev = fresh_fs(64, 64);
        let mut fs = FileSystem::new(&mut dev);
        fs.create(0, InodeType::RegularFile, "a").unwrap();
        let b = fs.create(0, InodeType::RegularFile, "b").unwrap();
        fs.create(0, InodeType::RegularFile, "c").unwrap();
        // Removing "a" swaps "c" (the last entry) into "a"'s slot.
        fs.unlink(0, "a").unwrap();
        assert_eq!(fs.lookup(0, "b").unwrap(), b);
        assert!(fs.lookup(0, "c").is_ok());
        assert!(matches!(fs.lookup(0, "a"), Err(FsError::NotFound)));
    }
}
