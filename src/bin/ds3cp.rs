//! Copies a host file's contents into an existing inode, as one transaction.

use std::env;
use std::fs;
use std::path::PathBuf;
use ufs::cli::{error, open_device};
use ufs::{FileSystem, Transaction};

fn usage(bin: &str) -> ! {
    error(bin, "usage: diskImageFile src_file dst_inode")
}

fn main() {
    let bin = "ds3cp".to_string();
    let mut args = env::args().skip(1);
    let image: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    let src_path: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    let dst_inode: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| usage(&bin));
    if args.next().is_some() {
        usage(&bin);
    }

    let contents = fs::read(&src_path).unwrap_or_else(|_| error(&bin, "Failed to open file"));

    let mut dev = open_device(&bin, &image);
    let mut txn = Transaction::begin(&mut dev);
    let result = {
        let mut handle = FileSystem::new(&mut txn);
        handle.write(dst_inode, &contents, contents.len())
    };
    match result {
        Ok(_) => txn.commit().unwrap_or_else(|e| error(&bin, e)),
        Err(_) => {
            txn.rollback();
            error(&bin, "Could not write to dst_file");
        }
    }
}
