use bytealign::{find, find_byte, find_byte_set, ByteSet};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut haystack = vec![0u8; 1_000_000];
    thread_rng().fill(haystack.as_mut_slice());
    haystack[900_000..900_010].copy_from_slice(b"needle!!!!");

    c.bench_function("find_byte tail", |b| b.iter(|| find_byte(black_box(&haystack), b'!')));

    let mut group = c.benchmark_group("find");
    group.bench_function("short needle", |b| b.iter(|| find(black_box(&haystack), black_box(b"needle!!!!"))));
    group.bench_function("single byte needle", |b| b.iter(|| find(black_box(&haystack), black_box(b"!"))));
    group.finish();

    let mut digits = ByteSet::new();
    for b in b'0'..=b'9' {
        digits.add(b);
    }
    c.bench_function("find_byte_set digits", |b| b.iter(|| find_byte_set(black_box(&haystack), &digits)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
