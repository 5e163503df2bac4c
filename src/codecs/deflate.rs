//! gzip adapter built on `flate2`, the idiomatic choice for gzip/deflate
//! container support.

use std::io::{Read, Write};
use std::time::UNIX_EPOCH;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};

use crate::algorithm::CompressOptions;
use crate::config::{GZIP_MAX_LEVEL, GZIP_MIN_LEVEL};
use crate::error::{CodecError, CodecResult};
use crate::file_info::{ChecksumKind, FileInfo};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

pub fn probe(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == GZIP_MAGIC[0] && buf[1] == GZIP_MAGIC[1]
}

/// Wraps the destination writer to recover the byte count after
/// `GzEncoder::finish` hands the inner writer back, since `flate2` doesn't
/// expose total output bytes once the encoder is consumed.
struct CountingWriter<'a> {
    inner: &'a mut dyn Write,
    count: u64,
}

impl<'a> CountingWriter<'a> {
    fn new(inner: &'a mut dyn Write) -> Self {
        CountingWriter { inner, count: 0 }
    }
}

impl<'a> Write for CountingWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

pub fn compress(
    input: &mut dyn Read,
    output: &mut dyn Write,
    opts: &CompressOptions,
) -> CodecResult<FileInfo> {
    let level = opts.level.clamp(GZIP_MIN_LEVEL, GZIP_MAX_LEVEL) as u32;
    let mtime_secs = opts
        .mtime_hint
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0);

    let mut builder = GzBuilder::new().mtime(mtime_secs);
    if opts.save_name {
        if let Some(name) = &opts.name_hint {
            builder = builder.filename(name.as_str());
        }
    }

    let mut encoder: GzEncoder<CountingWriter> =
        builder.write(CountingWriter::new(output), Compression::new(level));
    let bytes_in = std::io::copy(input, &mut encoder).map_err(|_| CodecError::Read)?;
    let sink = encoder.finish().map_err(|_| CodecError::Write)?;

    let mut info = FileInfo::new();
    info.uncompressed_bytes = bytes_in;
    info.compressed_bytes = sink.count;
    info.checksum_kind = ChecksumKind::Crc32;
    info.original_name = opts.name_hint.clone().filter(|_| opts.save_name);
    info.mtime = opts.mtime_hint;
    Ok(info)
}

pub fn decompress(input: &mut dyn Read, output: &mut dyn Write) -> CodecResult<FileInfo> {
    let mut decoder = MultiGzDecoder::new(input);
    let bytes_out = std::io::copy(&mut decoder, output).map_err(|_| CodecError::Format)?;

    let mut info = FileInfo::new();
    info.uncompressed_bytes = bytes_out;
    info.checksum_kind = ChecksumKind::Crc32;
    if let Some(name) = decoder.header().and_then(|h| h.filename()) {
        info.original_name = Some(String::from_utf8_lossy(name).into_owned());
    }
    if let Some(header) = decoder.header() {
        let mtime = header.mtime();
        if mtime != 0 {
            info.mtime = Some(UNIX_EPOCH + std::time::Duration::from_secs(mtime as u64));
        }
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_matches_gzip_magic_only() {
        assert!(probe(&[0x1F, 0x8B, 0x08]));
        assert!(!probe(&[0x1F, 0x9D, 0x90]));
    }

    #[test]
    fn round_trip_without_name() {
        let opts = CompressOptions {
            level: 6,
            ..Default::default()
        };
        let mut compressed = Vec::new();
        let mut input = &b"hello gzip world"[..];
        let info = compress(&mut input, &mut compressed, &opts).unwrap();
        assert!(info.compressed_bytes > 0);

        let mut decompressed = Vec::new();
        let mut src = &compressed[..];
        decompress(&mut src, &mut decompressed).unwrap();
        assert_eq!(decompressed, b"hello gzip world");
    }

    #[test]
    fn round_trip_with_saved_name() {
        let opts = CompressOptions {
            level: 6,
            save_name: true,
            name_hint: Some("notes.txt".to_string()),
            mtime_hint: Some(UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000)),
        };
        let mut compressed = Vec::new();
        let mut input = &b"text"[..];
        compress(&mut input, &mut compressed, &opts).unwrap();

        let mut decompressed = Vec::new();
        let mut src = &compressed[..];
        let info = decompress(&mut src, &mut decompressed).unwrap();
        assert_eq!(info.original_name.as_deref(), Some("notes.txt"));
        assert!(info.mtime.is_some());
    }

    #[test]
    fn concatenated_members_decode_fully() {
        let opts = CompressOptions {
            level: 6,
            ..Default::default()
        };
        let mut first = Vec::new();
        compress(&mut &b"abc"[..], &mut first, &opts).unwrap();
        let mut second = Vec::new();
        compress(&mut &b"def"[..], &mut second, &opts).unwrap();
        let mut combined = first;
        combined.extend(second);

        let mut decompressed = Vec::new();
        let mut src = &combined[..];
        decompress(&mut src, &mut decompressed).unwrap();
        assert_eq!(decompressed, b"abcdef");
    }
}
