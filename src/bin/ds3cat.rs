//! Prints an inode's direct block numbers and its full content.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use ufs::cli::{error, open_device};
use ufs::{FileSystem, InodeType, BLOCK_SIZE};

fn usage(bin: &str) -> ! {
    error(bin, "usage: diskImageFile inodeNumber")
}

fn main() {
    let bin = "ds3cat".to_string();
    let mut args = env::args().skip(1);
    let image: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    let inode_number: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| usage(&bin));
    if args.next().is_some() {
        usage(&bin);
    }

    let mut dev = open_device(&bin, &image);
    let mut fs = FileSystem::new(&mut dev);

    let inode = fs
        .stat(inode_number)
        .unwrap_or_else(|_| error(&bin, "Error reading file"));
    if inode.kind() != Some(InodeType::RegularFile) {
        error(&bin, "Error reading file");
    }

    println!("File blocks");
    let num_blocks = (inode.size as usize + BLOCK_SIZE - 1) / BLOCK_SIZE;
    for block_no in &inode.direct[..num_blocks] {
        println!("{block_no}");
    }
    println!();

    println!("File data");
    let mut buf = vec![0u8; inode.size as usize];
    let n = fs
        .read(inode_number, &mut buf, inode.size as usize)
        .unwrap_or_else(|_| error(&bin, "Error reading file"));
    if n != inode.size as usize {
        error(&bin, "Error reading file");
    }
    io::stdout().write_all(&buf).unwrap_or_else(|e| error(&bin, e));
}
