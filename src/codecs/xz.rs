//! xz adapter built on `liblzma`, driving the higher-level `.xz` container
//! (multi-filter, CRC-64, multithreaded encode) rather than a raw LZMA1
//! stream.

use std::io::{Read, Write};

use liblzma::stream::{Check, MtStreamBuilder, Stream};

use crate::algorithm::CompressOptions;
use crate::config::{XZ_MAX_LEVEL, XZ_MIN_LEVEL, XZ_MT_MEMORY_FRACTION};
use crate::error::{CodecError, CodecResult};
use crate::file_info::{ChecksumKind, FileInfo};
use crate::util::count_cores;

const XZ_MAGIC: [u8; 6] = [0xFD, b'7', b'z', b'X', b'Z', 0x00];

pub fn probe(buf: &[u8]) -> bool {
    buf.len() >= XZ_MAGIC.len() && buf[..XZ_MAGIC.len()] == XZ_MAGIC
}

/// Builds a multithreaded xz encoder stream when more than one core is
/// available, falling back to the single-threaded easy encoder otherwise
/// or if stream initialization fails.
fn open_encoder(level: u32) -> CodecResult<Stream> {
    let cores = count_cores();
    if cores > 1 {
        // A fixed per-thread budget rather than a queried total-memory
        // figure: liblzma already rejects a thread count it can't afford
        // within `memlimit`, so this only needs to be a generous ceiling.
        let memlimit = (cores as u64) * (1 << 30) / XZ_MT_MEMORY_FRACTION;
        let mut builder = MtStreamBuilder::new();
        builder.threads(cores as u32);
        builder.preset(level);
        builder.check(Check::Crc64);
        builder.memlimit(memlimit);
        if let Ok(stream) = builder.encoder() {
            return Ok(stream);
        }
    }
    Stream::new_easy_encoder(level, Check::Crc64).map_err(|_| CodecError::OutOfMemory)
}

pub fn compress(
    input: &mut dyn Read,
    output: &mut dyn Write,
    opts: &CompressOptions,
) -> CodecResult<FileInfo> {
    use liblzma::stream::Action;

    let level = opts.level.clamp(XZ_MIN_LEVEL, XZ_MAX_LEVEL) as u32;
    let mut stream = open_encoder(level)?;

    let mut in_buf = [0u8; 65536];
    let mut out_buf = [0u8; 65536];
    let mut bytes_in: u64 = 0;
    let mut bytes_out: u64 = 0;

    loop {
        let n = input.read(&mut in_buf).map_err(|_| CodecError::Read)?;
        let eof = n == 0;
        let mut offset = 0;
        loop {
            let before_in = stream.total_in();
            let before_out = stream.total_out();
            stream
                .process(
                    &in_buf[offset..n],
                    &mut out_buf,
                    if eof { Action::Finish } else { Action::Run },
                )
                .map_err(|_| CodecError::Write)?;
            let consumed = (stream.total_in() - before_in) as usize;
            let produced = (stream.total_out() - before_out) as usize;
            offset += consumed;
            bytes_in += consumed as u64;
            bytes_out += produced as u64;
            output
                .write_all(&out_buf[..produced])
                .map_err(|_| CodecError::Write)?;
            if !eof && offset >= n {
                break;
            }
            if eof && produced == 0 && consumed == 0 {
                break;
            }
        }
        if eof {
            break;
        }
    }

    let mut info = FileInfo::new();
    info.uncompressed_bytes = bytes_in;
    info.compressed_bytes = bytes_out;
    info.checksum_kind = ChecksumKind::Crc64;
    Ok(info)
}

pub fn decompress(input: &mut dyn Read, output: &mut dyn Write) -> CodecResult<FileInfo> {
    use liblzma::stream::{Action, Status, MT_DECODER_CONCATENATED};

    let mut stream = Stream::new_stream_decoder(u64::MAX, MT_DECODER_CONCATENATED)
        .map_err(|_| CodecError::Format)?;

    let mut in_buf = [0u8; 65536];
    let mut out_buf = [0u8; 65536];
    let mut bytes_out: u64 = 0;

    loop {
        let n = input.read(&mut in_buf).map_err(|_| CodecError::Read)?;
        let eof = n == 0;
        let mut offset = 0;
        loop {
            let before_in = stream.total_in();
            let before_out = stream.total_out();
            let status = stream
                .process(
                    &in_buf[offset..n],
                    &mut out_buf,
                    if eof { Action::Finish } else { Action::Run },
                )
                .map_err(|_| CodecError::Format)?;
            let consumed = (stream.total_in() - before_in) as usize;
            let produced = (stream.total_out() - before_out) as usize;
            offset += consumed;
            bytes_out += produced as u64;
            output
                .write_all(&out_buf[..produced])
                .map_err(|_| CodecError::Write)?;
            if status == Status::StreamEnd {
                let mut info = FileInfo::new();
                info.uncompressed_bytes = bytes_out;
                info.checksum_kind = ChecksumKind::Crc64;
                return Ok(info);
            }
            if !eof && offset >= n {
                break;
            }
            if eof && produced == 0 && consumed == 0 {
                return Err(CodecError::Format);
            }
        }
        if eof {
            break;
        }
    }

    let mut info = FileInfo::new();
    info.uncompressed_bytes = bytes_out;
    info.checksum_kind = ChecksumKind::Crc64;
    Ok(info)
}
