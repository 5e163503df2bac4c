#![no_main]

use libfuzzer_sys::fuzz_target;
use rzcompress::lzw;

fuzz_target!(|data: &[u8]| {
    for max_bits in [9u32, 12, 16] {
        let mut compressed = Vec::new();
        if lzw::compress(data, &mut compressed, max_bits).is_err() {
            continue;
        }
        let mut decompressed = Vec::new();
        lzw::decompress(&compressed[..], &mut decompressed).unwrap();
        assert_eq!(decompressed, data);
    }
});
