//! Prints a disk image's superblock fields and the raw bytes of its inode
//! and data bitmaps.

use std::env;
use std::path::PathBuf;
use ufs::cli::{error, open_device};
use ufs::layout;

fn usage(bin: &str) -> ! {
    error(bin, "usage: diskImageFile")
}

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

fn print_bytes(bytes: &[u8]) {
    for b in bytes {
        print!("{b} ");
    }
    println!();
}

fn main() {
    let bin = "ds3bits".to_string();
    let mut args = env::args().skip(1);
    let image: PathBuf = args.next().unwrap_or_else(|| usage(&bin)).into();
    if args.next().is_some() {
        usage(&bin);
    }

    let mut dev = open_device(&bin, &image);
    let sb = layout::read_superblock(&mut dev).unwrap_or_else(|e| error(&bin, e));
    let inode_bitmap = layout::read_bitmap_region(&mut dev, sb.inode_bitmap_addr, sb.inode_bitmap_len)
        .unwrap_or_else(|e| error(&bin, e));
    let data_bitmap = layout::read_bitmap_region(&mut dev, sb.data_bitmap_addr, sb.data_bitmap_len)
        .unwrap_or_else(|e| error(&bin, e));

    println!("Super");
    println!("inode_region_addr {}", sb.inode_region_addr);
    println!("inode_region_len {}", sb.inode_region_len);
    println!("num_inodes {}", sb.num_inodes);
    println!("data_region_addr {}", sb.data_region_addr);
    println!("data_region_len {}", sb.data_region_len);
    println!("num_data {}", sb.num_data);
    println!();

    println!("Inode bitmap");
    print_bytes(&inode_bitmap[..ceil_div(sb.num_inodes as usize, 8)]);
    println!();

    println!("Data bitmap");
    print_bytes(&data_bitmap[..ceil_div(sb.num_data as usize, 8)]);
}
