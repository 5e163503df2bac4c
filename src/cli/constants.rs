//! Identity strings, size constants, and the verbosity/display machinery
//! shared across the CLI layer: file-scoped globals and `DISPLAY*` macros
//! for the three names this binary answers to.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

pub const COMPRESSOR_NAME: &str = "compress";
pub const UNCOMPRESS_NAME: &str = "uncompress";
pub const ZCAT_NAME: &str = "zcat";
pub const DEFAULT_SUFFIX: &str = ".Z";

pub const KB: u64 = 1 << 10;
pub const MB: u64 = 1 << 20;
pub const GB: u64 = 1 << 30;

/// 0 = no output; 1 = errors only; 2 = normal (downgradable by `-q`);
/// 3 = non-downgradable warnings; 4 = verbose (`-v`).
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Set when the binary is invoked (or symlinked) as `zcat`: implies
/// `-d -c` regardless of other flags.
pub static ZCAT_ALIAS: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn zcat_alias() -> bool {
    ZCAT_ALIAS.load(Ordering::Relaxed)
}

#[inline]
pub fn set_zcat_alias(enabled: bool) {
    ZCAT_ALIAS.store(enabled, Ordering::Relaxed);
}

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_constants() {
        assert_eq!(COMPRESSOR_NAME, "compress");
        assert_eq!(DEFAULT_SUFFIX, ".Z");
    }

    #[test]
    fn size_constants() {
        assert_eq!(KB, 1024);
        assert_eq!(MB, 1024 * 1024);
        assert_eq!(GB, 1024 * 1024 * 1024);
    }

    #[test]
    fn display_level_round_trips() {
        let prev = display_level();
        set_display_level(3);
        assert_eq!(display_level(), 3);
        set_display_level(prev);
    }

    #[test]
    fn zcat_alias_round_trips() {
        set_zcat_alias(false);
        assert!(!zcat_alias());
        set_zcat_alias(true);
        assert!(zcat_alias());
        set_zcat_alias(false);
    }
}
