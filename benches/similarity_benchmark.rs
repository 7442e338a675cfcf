use bytealign::{
    edit_distance, needleman_wunsch_score, score_pairs, smith_waterman_score, CostTable, GapCost,
    Locality, Objective, ProcessAllocator, SingleThread, UniformCost,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn random_ascii(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = thread_rng();
    let short_a = random_ascii(&mut rng, 32);
    let short_b = random_ascii(&mut rng, 32);
    let long_a = random_ascii(&mut rng, 4_096);
    let long_b = random_ascii(&mut rng, 4_096);

    let mut group = c.benchmark_group("edit_distance");
    group.bench_function("short pair", |b| {
        b.iter(|| edit_distance(black_box(&short_a), black_box(&short_b), None, &ProcessAllocator))
    });
    group.bench_function("long pair", |b| {
        b.iter(|| edit_distance(black_box(&long_a), black_box(&long_b), None, &ProcessAllocator))
    });
    group.bench_function("bounded", |b| {
        b.iter(|| edit_distance(black_box(&long_a), black_box(&long_b), Some(16), &ProcessAllocator))
    });
    group.finish();

    let identity = CostTable::identity();
    c.bench_function("needleman_wunsch_score long pair", |b| {
        b.iter(|| {
            needleman_wunsch_score(
                black_box(&long_a),
                black_box(&long_b),
                &identity,
                GapCost::Linear(-1),
                &ProcessAllocator,
            )
        })
    });

    let affine_subs = CostTable::diagonal(1, -1);
    c.bench_function("smith_waterman_score affine", |b| {
        b.iter(|| {
            smith_waterman_score(
                black_box(&short_a),
                black_box(&short_b),
                &affine_subs,
                GapCost::Affine { open: -2, extend: -1 },
                &ProcessAllocator,
            )
        })
    });

    let pairs_a: Vec<Vec<u8>> = (0..64).map(|_| random_ascii(&mut rng, 64)).collect();
    let pairs_b: Vec<Vec<u8>> = (0..64).map(|_| random_ascii(&mut rng, 64)).collect();
    let refs_a: Vec<&[u8]> = pairs_a.iter().map(|v| v.as_slice()).collect();
    let refs_b: Vec<&[u8]> = pairs_b.iter().map(|v| v.as_slice()).collect();
    let uniform = UniformCost::levenshtein();
    c.bench_function("score_pairs batch of 64", |b| {
        b.iter(|| {
            let mut out = vec![0i64; refs_a.len()];
            score_pairs(
                black_box(&refs_a),
                black_box(&refs_b),
                &uniform,
                GapCost::Linear(1),
                Objective::MinimizeDistance,
                Locality::Global,
                &ProcessAllocator,
                &SingleThread,
                &mut out,
            )
            .unwrap();
            out
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
