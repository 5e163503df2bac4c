//! Usage/help text and version banner: an `error_out`/`print_usage`/
//! `print_bad_usage` trio writing through the `displaylevel!` macro, for
//! this program's flag set.

use crate::cli::constants::{display_level, COMPRESSOR_NAME};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prints `msg` to stderr at display level 1 then exits with code 1.
pub fn error_out(msg: &str) -> ! {
    if display_level() >= 1 {
        eprintln!("{msg}");
    }
    std::process::exit(1);
}

pub fn print_usage(program: &str) {
    if display_level() < 1 {
        return;
    }
    eprintln!("Usage: {program} [OPTION]... [FILE]...");
    eprintln!("Compress or decompress FILEs in the historical .Z format (default),");
    eprintln!("or gzip/xz when selected with -g/-O/-m.");
}

pub fn print_usage_advanced(program: &str) {
    print_usage(program);
    eprintln!();
    eprintln!("  -b LEVEL        set compression level (lzw bits or gzip/xz level)");
    eprintln!("  -c, --stdout    write to standard output, keep original files");
    eprintln!("  -d, --decompress");
    eprintln!("  -f, --force     overwrite existing files, follow no symlinks checks");
    eprintln!("  -g              select gzip");
    eprintln!("  -h, --help      display this help and exit");
    eprintln!("  -k, --keep      keep (don't delete) input files");
    eprintln!("  -l, --list      list compressed file contents");
    eprintln!("  -m ALGO         select algorithm by name (lzw, gzip, xz)");
    eprintln!("  -N, --name      restore stored name/time on decompress");
    eprintln!("  -n, --no-name   omit name/time when compressing");
    eprintln!("  -o FILE         write output to FILE");
    eprintln!("  -O              select lzw");
    eprintln!("  -q, --quiet     suppress warnings");
    eprintln!("  -r, --recursive operate recursively on directories");
    eprintln!("  -S, --suffix=SUF  use suffix SUF instead of the algorithm default");
    eprintln!("  -t, --test      test compressed file integrity");
    eprintln!("  -v, --verbose   print compression statistics");
    eprintln!("  -V, --version   display version information and exit");
    eprintln!("      --fast      fastest compression for the selected algorithm");
    eprintln!("      --best      best compression for the selected algorithm");
    eprintln!("      --ascii     accepted, ignored");
}

pub fn print_version() {
    if display_level() < 1 {
        return;
    }
    println!("{COMPRESSOR_NAME} {VERSION}");
}

pub fn print_bad_usage(program: &str, message: &str) -> ! {
    if display_level() >= 1 {
        eprintln!("{program}: {message}");
        eprintln!("Try '{program} --help' for more information.");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_is_non_empty() {
        assert!(!VERSION.is_empty());
    }
}
