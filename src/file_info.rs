//! The file-info record threaded between the pipeline driver and each
//! codec.
//!
//! Populated by a codec as it streams (gzip/xz recover the original name
//! and mtime from the compressed header; LZW never sets them) and consumed
//! by the driver afterward to apply metadata and pick an output name in
//! restore-name mode.

use std::time::SystemTime;

/// Integrity-check kind a codec reports, purely informational — the check
/// itself is verified internally by the codec/library, not recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    None,
    Crc32,
    Crc64,
}

/// Out-parameter carried through one file's processing.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    /// Original filename recovered from the stream (gzip/xz "restore name"
    /// mode). `None` for LZW, or when the codec didn't save one.
    pub original_name: Option<String>,
    /// Modification time recovered from the stream, if any.
    pub mtime: Option<SystemTime>,
    pub compressed_bytes: u64,
    pub uncompressed_bytes: u64,
    pub checksum_kind: ChecksumKind,
}

impl FileInfo {
    pub fn new() -> Self {
        FileInfo::default()
    }

    /// `1 - compressed/uncompressed`; negative means the output expanded.
    /// Mirrors `lzw::compression_ratio`, generalized to any codec.
    pub fn ratio(&self) -> f64 {
        crate::lzw::compression_ratio(self.uncompressed_bytes, self.compressed_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_name_or_mtime() {
        let info = FileInfo::new();
        assert!(info.original_name.is_none());
        assert!(info.mtime.is_none());
    }

    #[test]
    fn ratio_reflects_shrinkage() {
        let info = FileInfo {
            uncompressed_bytes: 1000,
            compressed_bytes: 250,
            ..FileInfo::default()
        };
        assert!((info.ratio() - 0.75).abs() < 1e-9);
    }
}
