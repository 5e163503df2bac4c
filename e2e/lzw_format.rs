//! End-to-end tests against the LZW `.Z` wire format.

use rzcompress::lzw;

#[test]
fn empty_input_produces_exactly_the_three_byte_header() {
    let mut out = Vec::new();
    let stats = lzw::compress(&b""[..], &mut out, 16).unwrap();
    assert_eq!(out, vec![0x1F, 0x9D, 0x90]);
    assert_eq!(stats.bytes_in, 0);

    let mut decoded = Vec::new();
    lzw::decompress(&out[..], &mut decoded).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn short_repetitive_input_round_trips_at_min_bits() {
    let input = b"AAAAAAAA";
    let mut out = Vec::new();
    lzw::compress(&input[..], &mut out, 9).unwrap();
    assert!(out.len() <= input.len() + 3);

    let mut decoded = Vec::new();
    lzw::decompress(&out[..], &mut decoded).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn large_uniform_input_round_trips_at_max_bits() {
    let input = vec![0u8; 100_000];
    let mut out = Vec::new();
    lzw::compress(&input[..], &mut out, 16).unwrap();

    let mut decoded = Vec::new();
    lzw::decompress(&out[..], &mut decoded).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn header_bytes_encode_max_bits() {
    for max_bits in 9..=16u32 {
        let mut out = Vec::new();
        lzw::compress(&b"hello world"[..], &mut out, max_bits).unwrap();
        assert_eq!(out[0], 0x1F);
        assert_eq!(out[1], 0x9D);
        assert_eq!(out[2] & 0x1F, max_bits as u8);
        assert_eq!(out[2] & 0x60, 0, "reserved bits must be zero");
    }
}

#[test]
fn nine_bit_quirk_sequence_round_trips() {
    let mut input = Vec::new();
    for _ in 0..4 {
        input.extend(0u8..=255u8);
    }
    let mut out = Vec::new();
    lzw::compress(&input[..], &mut out, 9).unwrap();

    let mut decoded = Vec::new();
    lzw::decompress(&out[..], &mut decoded).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn random_binary_content_round_trips_across_every_width() {
    // A fixed pseudo-random sequence (no external RNG dependency) covering
    // every byte value several times over.
    let mut input = Vec::with_capacity(20_000);
    let mut state: u32 = 0x1234_5678;
    for _ in 0..20_000 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        input.push((state >> 16) as u8);
    }
    for max_bits in [9, 10, 12, 16] {
        let mut out = Vec::new();
        lzw::compress(&input[..], &mut out, max_bits).unwrap();
        let mut decoded = Vec::new();
        lzw::decompress(&out[..], &mut decoded).unwrap();
        assert_eq!(decoded, input, "round-trip failed at max_bits={max_bits}");
    }
}

#[test]
fn uncompressible_random_data_is_flagged_by_ratio() {
    let mut input = Vec::with_capacity(50_000);
    let mut state: u32 = 0xdead_beef;
    for _ in 0..50_000 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        input.push((state >> 24) as u8);
    }
    let mut out = Vec::new();
    let stats = lzw::compress(&input[..], &mut out, 9).unwrap();
    // The driver layer is the one that actually enforces the "didn't
    // shrink" exit code; here we just confirm the stats reflect no gain.
    assert!(stats.bytes_out >= stats.bytes_in || out.len() > input.len() / 2);
}
