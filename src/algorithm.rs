//! The algorithm registry: a fixed, ordered list of codecs with names,
//! extensions, level ranges, and probe/compress/decompress entry points.
//!
//! A small enum-based descriptor table, generalized to hold a list rather
//! than a fixed set of variants. Byte-sink "discard output" is expressed the
//! idiomatic Rust way — callers pass `&mut io::sink()` as the output writer
//! instead of a magic descriptor value — documented as a deliberate
//! deviation in DESIGN.md.

use std::io::{Read, Write};
use std::time::SystemTime;

use crate::error::CodecResult;
use crate::file_info::FileInfo;
use crate::{codecs, lzw};

/// One extension-table entry. `A` alone means decompressing `name.A` yields
/// `name`; `A:B` (replacement) means it yields `name.B` instead.
#[derive(Debug, Clone, Copy)]
pub struct Extension {
    pub ext: &'static str,
    pub replacement: Option<&'static str>,
}

impl Extension {
    const fn plain(ext: &'static str) -> Self {
        Extension {
            ext,
            replacement: None,
        }
    }
    const fn replace(ext: &'static str, replacement: &'static str) -> Self {
        Extension {
            ext,
            replacement: Some(replacement),
        }
    }
}

/// Options threaded into a compress call. Bundled into one struct rather
/// than growing the function-pointer signature per codec, since gzip/xz need
/// strictly more than LZW does (a "save name" mode).
#[derive(Debug, Clone, Default)]
pub struct CompressOptions {
    /// Compression level (bits, for LZW; 1-9/0-9 for gzip/xz).
    pub level: i32,
    /// gzip/xz only: embed the original filename and mtime in the stream.
    pub save_name: bool,
    pub name_hint: Option<String>,
    pub mtime_hint: Option<SystemTime>,
}

pub type CompressFn = fn(&mut dyn Read, &mut dyn Write, &CompressOptions) -> CodecResult<FileInfo>;
pub type DecompressFn = fn(&mut dyn Read, &mut dyn Write) -> CodecResult<FileInfo>;
pub type ProbeFn = fn(&[u8]) -> bool;

/// Immutable descriptor for one registered algorithm.
pub struct Algorithm {
    /// Comma-separated names a user may select via `-m NAME`.
    pub names: &'static [&'static str],
    pub extensions: &'static [Extension],
    pub min_level: i32,
    pub default_level: i32,
    pub max_level: i32,
    pub probe: ProbeFn,
    pub compress: CompressFn,
    pub decompress: DecompressFn,
}

impl Algorithm {
    pub fn primary_name(&self) -> &'static str {
        self.names[0]
    }

    pub fn primary_extension(&self) -> &'static str {
        self.extensions[0].ext
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Resolves a decompress-mode output name for an input ending in
    /// `.{ext}`. Returns the replacement suffix (or none, stripping the
    /// extension bare) when `ext` is one of this algorithm's extensions.
    pub fn resolve_extension(&self, ext: &str) -> Option<Option<&'static str>> {
        self.extensions
            .iter()
            .find(|e| e.ext == ext)
            .map(|e| e.replacement)
    }
}

/// LZW (`compress`/`.Z`) — must stay first in the registry: it is the
/// default output format and the implicit format for unknown suffixes.
pub const LZW: Algorithm = Algorithm {
    names: &["lzw", "compress"],
    extensions: &[Extension::plain("Z"), Extension::replace("taz", "tar")],
    min_level: 9,
    default_level: 16,
    max_level: 16,
    probe: lzw::probe,
    compress: codecs::lzw_adapter::compress,
    decompress: codecs::lzw_adapter::decompress,
};

pub const GZIP: Algorithm = Algorithm {
    names: &["gzip", "gz"],
    extensions: &[Extension::plain("gz"), Extension::replace("tgz", "tar")],
    min_level: 1,
    default_level: 6,
    max_level: 9,
    probe: codecs::deflate::probe,
    compress: codecs::deflate::compress,
    decompress: codecs::deflate::decompress,
};

pub const XZ: Algorithm = Algorithm {
    names: &["xz", "lzma"],
    extensions: &[Extension::plain("xz"), Extension::replace("txz", "tar")],
    min_level: 0,
    default_level: 6,
    max_level: 9,
    probe: codecs::xz::probe,
    compress: codecs::xz::compress,
    decompress: codecs::xz::decompress,
};

/// The fixed, ordered registry. LZW must stay first.
pub const REGISTRY: &[&Algorithm] = &[&LZW, &GZIP, &XZ];

/// Looks up an algorithm by exact name (`-m NAME`).
pub fn by_name(name: &str) -> Option<&'static Algorithm> {
    REGISTRY.iter().find(|a| a.matches_name(name)).copied()
}

/// Probes `buf` (at least 6 bytes were read by the driver) against every
/// registered algorithm in order; the first match wins.
pub fn probe_all(buf: &[u8]) -> Option<&'static Algorithm> {
    REGISTRY.iter().find(|a| (a.probe)(buf)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lzw_is_first_in_registry() {
        assert_eq!(REGISTRY[0].primary_name(), "lzw");
    }

    #[test]
    fn by_name_finds_aliases() {
        assert!(by_name("compress").is_some());
        assert!(by_name("gz").is_some());
        assert!(by_name("lzma").is_some());
        assert!(by_name("nonexistent").is_none());
    }

    #[test]
    fn extension_replacement_resolves() {
        let tgz = GZIP.resolve_extension("tgz").unwrap();
        assert_eq!(tgz, Some("tar"));
        let gz = GZIP.resolve_extension("gz").unwrap();
        assert_eq!(gz, None);
        assert!(GZIP.resolve_extension("xyz").is_none());
    }

    #[test]
    fn probe_all_distinguishes_formats() {
        let lzw_hdr = [0x1F, 0x9D, 0x90, 0, 0, 0];
        let gz_hdr = [0x1F, 0x8B, 0x08, 0, 0, 0];
        let xz_hdr = [0xFD, b'7', b'z', b'X', b'Z', 0x00];

        assert_eq!(probe_all(&lzw_hdr).unwrap().primary_name(), "lzw");
        assert_eq!(probe_all(&gz_hdr).unwrap().primary_name(), "gzip");
        assert_eq!(probe_all(&xz_hdr).unwrap().primary_name(), "xz");
        assert!(probe_all(&[0, 0, 0, 0, 0, 0]).is_none());
    }

    #[test]
    fn level_ranges_are_well_formed() {
        for algo in REGISTRY {
            assert!(algo.min_level <= algo.default_level);
            assert!(algo.default_level <= algo.max_level);
        }
    }
}
