//! Criterion benchmarks for the LZW codec.
//!
//! Run with:
//!   cargo bench --bench lzw

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn synthetic_text(len: usize) -> Vec<u8> {
    let words = ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[i % words.len()].as_bytes());
        out.push(b' ');
        i += 1;
    }
    out.truncate(len);
    out
}

fn bench_lzw_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw_compress");

    for &size in &[16 * 1024usize, 256 * 1024] {
        let data = synthetic_text(size);
        for &max_bits in &[9u32, 16] {
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("max_bits_{max_bits}"), size),
                &data,
                |b, data| {
                    b.iter(|| {
                        let mut out = Vec::with_capacity(data.len());
                        rzcompress::lzw::compress(&data[..], &mut out, max_bits).unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_lzw_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw_decompress");

    for &size in &[16 * 1024usize, 256 * 1024] {
        let data = synthetic_text(size);
        let mut compressed = Vec::new();
        rzcompress::lzw::compress(&data[..], &mut compressed, 16).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("max_bits_16", size),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(size);
                    rzcompress::lzw::decompress(&compressed[..], &mut out).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_lzw_compress, bench_lzw_decompress);
criterion_main!(benches);
