#![no_main]

use libfuzzer_sys::fuzz_target;
use rzcompress::lzw;

// Arbitrary bytes are never trusted to be a valid `.Z` stream; decompression
// must only ever return Ok or a CodecError, never panic.
fuzz_target!(|data: &[u8]| {
    let mut out = Vec::new();
    let _ = lzw::decompress(data, &mut out);
});
