//! The LZW `.Z` stream codec: header handling, the compress and decompress
//! loops, the block-compress `CLEAR`/ratio-reset heuristic, and the 9-bit
//! width quirk. Functions operate over any `Read`/`Write` rather than fixed
//! stdio descriptors.

use std::io::{Read, Write};

use crate::config::{
    CHECK_INTERVAL, LZW_BLOCK_MODE_MASK, LZW_MAGIC_0, LZW_MAGIC_1, LZW_MAXBITS_MASK,
    LZW_MAX_BITS, LZW_MIN_BITS, LZW_RESERVED_MASK,
};
use crate::error::{CodecError, CodecResult};
use crate::lzw::bitio::{BitReader, BitWriter};
use crate::lzw::dict::{DecoderDict, EncoderDict};

/// Code 256, reserved as the reset marker when block-compress is set.
const CLEAR: u32 = 256;

/// Returns `true` if `buf` begins with the LZW `.Z` magic bytes. Requires
/// at least 2 bytes.
pub fn probe(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == LZW_MAGIC_0 && buf[1] == LZW_MAGIC_1
}

/// `1 - compressed/uncompressed`; `-1.0` for empty input.
pub fn compression_ratio(uncompressed: u64, compressed: u64) -> f64 {
    if uncompressed == 0 {
        -1.0
    } else {
        1.0 - (compressed as f64 / uncompressed as f64)
    }
}

/// Outcome of a compress/decompress call: byte counts for the caller to
/// derive the ratio and update file-info records.
pub struct CodecStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Compresses `input` to `output` using block-compress mode (the modern
/// `compress(1)` default: `CLEAR` is available and the ratio-reset
/// heuristic is active) at `max_bits` (9..=16).
pub fn compress<R: Read, W: Write>(
    mut input: R,
    output: W,
    max_bits: u32,
) -> CodecResult<CodecStats> {
    debug_assert!((LZW_MIN_BITS..=LZW_MAX_BITS).contains(&max_bits));

    let header = [
        LZW_MAGIC_0,
        LZW_MAGIC_1,
        LZW_BLOCK_MODE_MASK | (max_bits as u8 & LZW_MAXBITS_MASK),
    ];
    let mut bw = BitWriter::new(output);
    {
        let sink = bw.get_mut();
        sink.write_all(&header).map_err(|_| CodecError::Write)?;
    }
    let header_bytes = header.len() as u64;

    let mut first_byte = [0u8; 1];
    let n = input.read(&mut first_byte).map_err(|_| CodecError::Read)?;
    if n == 0 {
        // Empty input: header only.
        return Ok(CodecStats {
            bytes_in: 0,
            bytes_out: header_bytes,
        });
    }

    let mut dict = EncoderDict::new();
    let mut next_free: u32 = CLEAR + 1; // 257: block-compress always on here
    let mut current_bits: u32 = LZW_MIN_BITS;
    let mut nine_bit_quirk_done = false;

    let mut current_seq: u32 = first_byte[0] as u32;
    let mut bytes_in: u64 = 1;

    // Ratio-reset bookkeeping, active only once the dictionary is full.
    let mut best_ratio: f64 = f64::MIN;
    let mut bytes_in_at_full: u64 = 0;
    let mut next_check_at: u64 = 0;

    let mut byte = [0u8; 1];
    loop {
        let n = input.read(&mut byte).map_err(|_| CodecError::Read)?;
        if n == 0 {
            break;
        }
        bytes_in += 1;
        let c = byte[0];

        if let Some(code) = dict.lookup(current_seq, c) {
            current_seq = code;
            continue;
        }

        bw.write_code(current_seq, current_bits)?;

        let dict_full = next_free >= (1u32 << max_bits);
        if !dict_full {
            dict.insert(current_seq, c, next_free);
            // Check the just-assigned code against the current width before
            // advancing next_free: the decoder only learns of this entry one
            // code later, so growing on the pre-increment value is what
            // keeps the two in sync.
            grow_width(&mut bw, &mut current_bits, next_free, max_bits)?;
            next_free += 1;
            if next_free >= (1u32 << max_bits) {
                bytes_in_at_full = bytes_in;
                next_check_at = bytes_in_at_full + CHECK_INTERVAL;
            }
        } else if max_bits == LZW_MIN_BITS && !nine_bit_quirk_done {
            // 9-bit quirk: the dictionary filled while current_bits was still
            // 9 (since max_bits == 9 == LZW_MIN_BITS means no normal growth
            // ever ran). Transition once to 10 bits despite max_bits.
            bw.pad_group(current_bits)?;
            current_bits += 1;
            nine_bit_quirk_done = true;
            bytes_in_at_full = bytes_in;
            next_check_at = bytes_in_at_full + CHECK_INTERVAL;
        } else if bytes_in >= next_check_at {
            // Ratio-reset heuristic.
            let out_bytes = bw.bytes_written();
            let ratio = compression_ratio(bytes_in - bytes_in_at_full, out_bytes);
            if ratio < best_ratio {
                bw.write_code(CLEAR, current_bits)?;
                bw.pad_group(current_bits)?;
                dict.reset();
                next_free = CLEAR + 1;
                current_bits = LZW_MIN_BITS;
                nine_bit_quirk_done = false;
                best_ratio = f64::MIN;
                bytes_in_at_full = 0;
                next_check_at = 0;
            } else {
                best_ratio = ratio;
            }
            next_check_at = bytes_in + CHECK_INTERVAL;
        }

        current_seq = c as u32;
    }

    bw.write_code(current_seq, current_bits)?;
    bw.flush_partial_byte()?;

    let bytes_out = header_bytes + bw.bytes_written();
    Ok(CodecStats {
        bytes_in,
        bytes_out,
    })
}

/// After inserting a new dictionary entry, grows `current_bits` once the
/// just-assigned code (`next_free`, not yet advanced) can no longer be
/// represented in the current width.
fn grow_width<W: Write>(
    bw: &mut BitWriter<W>,
    current_bits: &mut u32,
    next_free: u32,
    max_bits: u32,
) -> CodecResult<()> {
    if *current_bits < max_bits && next_free >= (1u32 << *current_bits) {
        bw.pad_group(*current_bits)?;
        *current_bits += 1;
    }
    Ok(())
}

/// Decompresses an LZW `.Z` stream produced by [`compress`], or by any
/// conforming historical `compress` implementation — this decoder accepts
/// output from any LZW compressor, not just this crate's own.
pub fn decompress<R: Read, W: Write>(mut input: R, mut output: W) -> CodecResult<CodecStats> {
    let mut header = [0u8; 3];
    input.read_exact(&mut header).map_err(|_| CodecError::Format)?;
    if header[0] != LZW_MAGIC_0 || header[1] != LZW_MAGIC_1 {
        return Err(CodecError::Format);
    }
    if header[2] & LZW_RESERVED_MASK != 0 {
        return Err(CodecError::Format);
    }
    let block_mode = header[2] & LZW_BLOCK_MODE_MASK != 0;
    let max_bits = (header[2] & LZW_MAXBITS_MASK) as u32;
    if !(LZW_MIN_BITS..=LZW_MAX_BITS).contains(&max_bits) {
        return Err(CodecError::Format);
    }
    let dict_offset: u32 = if block_mode { 257 } else { 256 };

    let mut br = BitReader::new(input);
    let mut bytes_out: u64 = 0;

    let mut dict = DecoderDict::new(dict_offset, max_bits);
    let mut next_free = dict_offset;
    let mut current_bits = LZW_MIN_BITS;
    let mut nine_bit_quirk_done = false;

    let first_code = match br.read_code(current_bits)? {
        Some(c) => c,
        None => {
            // Header only: empty payload.
            return Ok(CodecStats {
                bytes_in: header.len() as u64,
                bytes_out: 0,
            });
        }
    };
    if first_code >= 256 {
        return Err(CodecError::Format);
    }
    output
        .write_all(&[first_code as u8])
        .map_err(|_| CodecError::Write)?;
    bytes_out += 1;
    let mut previous_seq = first_code;

    loop {
        let code = match br.read_code(current_bits)? {
            Some(c) => c,
            None => break,
        };

        if block_mode && code == CLEAR {
            br.discard_padding(current_bits)?;
            dict.reset();
            next_free = dict_offset;
            current_bits = LZW_MIN_BITS;
            nine_bit_quirk_done = false;
            let lit = match br.read_code(current_bits)? {
                Some(c) => c,
                None => break,
            };
            if lit >= 256 {
                return Err(CodecError::Format);
            }
            output
                .write_all(&[lit as u8])
                .map_err(|_| CodecError::Write)?;
            bytes_out += 1;
            previous_seq = lit;
            continue;
        }

        if code > next_free {
            return Err(CodecError::Format);
        }

        let first_byte = if code == next_free {
            // KwKwK special case: the code names an entry not yet inserted.
            // Its expansion is previous_seq's expansion followed by
            // previous_seq's own first byte.
            let mut expansion = Vec::new();
            let root = if previous_seq < 256 {
                expansion.push(previous_seq as u8);
                previous_seq as u8
            } else {
                dict.expand(previous_seq, &mut expansion)
            };
            expansion.push(root);
            output.write_all(&expansion).map_err(|_| CodecError::Write)?;
            bytes_out += expansion.len() as u64;
            root
        } else if code < 256 {
            output
                .write_all(&[code as u8])
                .map_err(|_| CodecError::Write)?;
            bytes_out += 1;
            code as u8
        } else {
            let mut expansion = Vec::new();
            let root = dict.expand(code, &mut expansion);
            output.write_all(&expansion).map_err(|_| CodecError::Write)?;
            bytes_out += expansion.len() as u64;
            root
        };

        let dict_full = next_free >= (1u32 << max_bits);
        if !dict_full {
            dict.insert(next_free, previous_seq, first_byte);
            next_free += 1;
            if current_bits < max_bits && next_free >= (1u32 << current_bits) {
                br.discard_padding(current_bits)?;
                current_bits += 1;
            }
        } else if max_bits == LZW_MIN_BITS && !nine_bit_quirk_done {
            br.discard_padding(current_bits)?;
            current_bits += 1;
            nine_bit_quirk_done = true;
        }

        previous_seq = code;
    }

    Ok(CodecStats {
        bytes_in: header.len() as u64 + br.bytes_read(),
        bytes_out,
    })
}
