//! Lists a directory's entries, or prints a single file's own entry if the
//! given path names a regular file.

use std::env;
use std::path::PathBuf;
use ufs::cli::{error, open_device, resolve_with_parent};
use ufs::dirent::DIR_ENT_SIZE;
use ufs::{DirectoryEntry, FileSystem, InodeType};

fn usage(bin: &str) -> ! {
    error(bin, "usage: diskImageFile directory")
}

fn main() {
    let bin = "ds3ls".to_string();
    let mut args = env::args().skip(1);
    let image: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    let directory = args.next().unwrap_or_else(|| usage(&bin));
    if args.next().is_some() {
        usage(&bin);
    }

    let mut dev = open_device(&bin, &image);
    let mut fs = FileSystem::new(&mut dev);

    let (parent_inum, inum) =
        resolve_with_parent(&mut fs, &directory).unwrap_or_else(|_| error(&bin, "Directory not found"));
    let inode = fs
        .stat(inum)
        .unwrap_or_else(|_| error(&bin, "Directory not found"));

    if inode.kind() == Some(InodeType::RegularFile) {
        let parent_inode = fs
            .stat(parent_inum)
            .unwrap_or_else(|_| error(&bin, "Directory not found"));
        let mut buf = vec![0u8; parent_inode.size as usize];
        fs.read(parent_inum, &mut buf, parent_inode.size as usize)
            .unwrap_or_else(|_| error(&bin, "Directory not found"));
        for chunk in buf.chunks(DIR_ENT_SIZE) {
            let entry = DirectoryEntry::from_bytes(chunk);
            if entry.inum as u32 == inum {
                println!("{inum}\t{}", entry.name());
                return;
            }
        }
        error(&bin, "Directory not found");
    }

    let mut buf = vec![0u8; inode.size as usize];
    fs.read(inum, &mut buf, inode.size as usize)
        .unwrap_or_else(|_| error(&bin, "Directory not found"));
    let mut entries: Vec<DirectoryEntry> = buf
        .chunks(DIR_ENT_SIZE)
        .map(DirectoryEntry::from_bytes)
        .filter(|e| !e.is_tombstone())
        .collect();
    entries.sort_by(|a, b| a.name().cmp(b.name()));
    for entry in entries {
        println!("{}\t{}", entry.inum, entry.name());
    }
}
