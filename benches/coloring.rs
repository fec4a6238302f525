#![forbid(unsafe_code)]
#![allow(missing_docs)]

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vizing::{EdgeRecord, Multigraph};

const SEED: u64 = 0x5eed;

fn random_simple_graph(vertices: i64, edges: usize, seed: u64) -> Vec<EdgeRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(edges);
    while records.len() < edges {
        let a = rng.gen_range(1..=vertices);
        let b = rng.gen_range(1..=vertices);
        if a == b || !seen.insert((a.min(b), a.max(b))) {
            continue;
        }
        records.push(EdgeRecord::new(records.len() as i64 + 1, a, b, 1));
    }
    records
}

fn complete_graph(n: i64) -> Vec<EdgeRecord> {
    let mut records = Vec::new();
    for a in 1..=n {
        for b in (a + 1)..=n {
            records.push(EdgeRecord::new(records.len() as i64 + 1, a, b, 1));
        }
    }
    records
}

fn color(records: &[EdgeRecord]) -> usize {
    let mut graph = Multigraph::from_records(records.iter().copied()).expect("graph");
    let report = graph.edge_coloring().expect("coloring");
    report.colors_used
}

fn coloring(c: &mut Criterion) {
    let mut group = c.benchmark_group("coloring/random");
    group.sample_size(20);
    for (vertices, edges) in [(256i64, 1_024usize), (1_024, 8_192), (4_096, 32_768)] {
        let records = random_simple_graph(vertices, edges, SEED);
        group.throughput(Throughput::Elements(edges as u64));
        group.bench_with_input(
            BenchmarkId::new("edges", edges),
            &records,
            |b, records| {
                b.iter(|| black_box(color(records)));
            },
        );
    }
    group.finish();

    let mut group = c.benchmark_group("coloring/complete");
    group.sample_size(20);
    for n in [16i64, 48, 96] {
        let records = complete_graph(n);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::new("k", n), &records, |b, records| {
            b.iter(|| black_box(color(records)));
        });
    }
    group.finish();
}

criterion_group!(benches, coloring);
criterion_main!(benches);
