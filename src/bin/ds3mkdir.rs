//! Creates a directory entry under a given parent inode, as one transaction.

use std::env;
use std::path::PathBuf;
use ufs::cli::{error, open_device};
use ufs::{FileSystem, InodeType, Transaction};

fn usage(bin: &str) -> ! {
    error(bin, "usage: diskImageFile parentInode directory")
}

fn main() {
    let bin = "ds3mkdir".to_string();
    let mut args = env::args().skip(1);
    let image: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    let parent_inode: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| usage(&bin));
    let directory = args.next().unwrap_or_else(|| usage(&bin));
    if args.next().is_some() {
        usage(&bin);
    }

    let mut dev = open_device(&bin, &image);
    let mut txn = Transaction::begin(&mut dev);
    let result = {
        let mut fs = FileSystem::new(&mut txn);
        fs.create(parent_inode, InodeType::Directory, &directory)
    };
    match result {
        Ok(_) => txn.commit().unwrap_or_else(|e| error(&bin, e)),
        Err(_) => {
            txn.rollback();
            error(&bin, "Error creating directory");
        }
    }
}
