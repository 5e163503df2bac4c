//! Adapts [`crate::lzw`] to the registry's uniform codec signature. LZW has
//! no restore-name capability, so `compress` ignores
//! `opts.save_name`/`name_hint`/`mtime_hint` and `decompress` never
//! populates [`FileInfo::original_name`].

use std::io::{Read, Write};

use crate::algorithm::CompressOptions;
use crate::error::CodecResult;
use crate::file_info::FileInfo;
use crate::lzw;

pub fn compress(
    input: &mut dyn Read,
    output: &mut dyn Write,
    opts: &CompressOptions,
) -> CodecResult<FileInfo> {
    let stats = lzw::compress(input, output, opts.level as u32)?;
    let mut info = FileInfo::new();
    info.uncompressed_bytes = stats.bytes_in;
    info.compressed_bytes = stats.bytes_out;
    Ok(info)
}

pub fn decompress(input: &mut dyn Read, output: &mut dyn Write) -> CodecResult<FileInfo> {
    let stats = lzw::decompress(input, output)?;
    let mut info = FileInfo::new();
    info.uncompressed_bytes = stats.bytes_out;
    info.compressed_bytes = stats.bytes_in;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_round_trips() {
        let opts = CompressOptions {
            level: 16,
            ..Default::default()
        };
        let mut compressed = Vec::new();
        let mut input = &b"hello hello hello"[..];
        let info = compress(&mut input, &mut compressed, &opts).unwrap();
        assert!(info.uncompressed_bytes > 0);
        assert!(info.original_name.is_none());

        let mut decompressed = Vec::new();
        let mut src = &compressed[..];
        let dinfo = decompress(&mut src, &mut decompressed).unwrap();
        assert_eq!(decompressed, b"hello hello hello");
        assert!(dinfo.original_name.is_none());
        assert_eq!(dinfo.compressed_bytes, compressed.len() as u64);
    }
}
