//! End-to-end tests covering the algorithm registry and probe-based format
//! detection across all three codecs.

use std::io::Cursor;

use rzcompress::algorithm::{probe_all, CompressOptions, GZIP, LZW, REGISTRY, XZ};

fn compress_with(algo: &rzcompress::algorithm::Algorithm, data: &[u8], level: i32) -> Vec<u8> {
    let opts = CompressOptions {
        level,
        ..Default::default()
    };
    let mut out = Vec::new();
    let mut input = data;
    (algo.compress)(&mut input, &mut out, &opts).unwrap();
    out
}

#[test]
fn probe_identifies_each_algorithms_own_output_and_rejects_the_others() {
    let payload = b"interop test payload, interop test payload";
    let lzw_out = compress_with(&LZW, payload, 16);
    let gzip_out = compress_with(&GZIP, payload, 6);
    let xz_out = compress_with(&XZ, payload, 6);

    assert_eq!(probe_all(&lzw_out).unwrap().primary_name(), "lzw");
    assert_eq!(probe_all(&gzip_out).unwrap().primary_name(), "gzip");
    assert_eq!(probe_all(&xz_out).unwrap().primary_name(), "xz");

    // Every algorithm's probe rejects every other algorithm's output.
    for (name, bytes) in [("lzw", &lzw_out), ("gzip", &gzip_out), ("xz", &xz_out)] {
        for algo in REGISTRY {
            let matches = (algo.probe)(bytes);
            assert_eq!(
                matches,
                algo.primary_name() == name,
                "{} probe disagreed on {} output",
                algo.primary_name(),
                name
            );
        }
    }
}

#[test]
fn concatenated_gzip_members_decode_to_the_concatenation_of_inputs() {
    let a = compress_with(&GZIP, b"first member", 6);
    let b = compress_with(&GZIP, b"second member", 6);
    let mut combined = a;
    combined.extend(b);

    let mut decoded = Vec::new();
    let mut src = Cursor::new(combined);
    (GZIP.decompress)(&mut src, &mut decoded).unwrap();
    assert_eq!(decoded, b"first membersecond member");
}

#[test]
fn each_algorithm_round_trips_through_its_registry_entry() {
    let payload = b"round trip through the registry entry points, twice twice";
    for algo in REGISTRY {
        let level = algo.default_level;
        let compressed = compress_with(algo, payload, level);
        let mut decoded = Vec::new();
        let mut src = Cursor::new(compressed);
        (algo.decompress)(&mut src, &mut decoded).unwrap();
        assert_eq!(decoded, payload, "{} failed to round-trip", algo.primary_name());
    }
}
