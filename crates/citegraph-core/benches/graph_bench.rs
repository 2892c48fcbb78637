//! # Engine Benchmarks
//!
//! Performance benchmarks for filtering and citation graph builds.
//!
//! Run with: `cargo bench -p citegraph-core`

use citegraph_core::{
    CitationCounts, FilterConfig, Record, RecordId, RecordStore, Topic, build_graph, filter,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn id(i: usize) -> RecordId {
    RecordId::new(format!("W{}", i))
}

/// A corpus where each record cites its two predecessors and is cited by
/// its two successors.
fn create_lattice(size: usize) -> RecordStore {
    let records = (0..size)
        .map(|i| {
            let mut r = Record::new(id(i).0, format!("Paper {} on graph learning", i));
            r.backward_citations = (1..=2).filter(|k| i >= *k).map(|k| id(i - k)).collect();
            r.forward_citations = (1..=2)
                .map(|k| i + k)
                .filter(|j| *j < size)
                .map(id)
                .collect();
            r.citation_counts = CitationCounts {
                forward: (i % 50) as u64,
            };
            r.topics = vec![Topic::new("Networks", "Computer Science", "Physical Sciences")];
            r.states = vec![if i % 2 == 0 { "CA" } else { "NY" }.to_string()];
            r
        })
        .collect();
    RecordStore::new(records).expect("store")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let config = FilterConfig::new()
        .with_title("graph learning")
        .with_field("Computer Science")
        .with_state("CA")
        .with_citation_range(Some(10), Some(40));

    for size in [100, 1000, 10000].iter() {
        let store = create_lattice(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(filter(&store, &config).len()));
        });
    }

    group.finish();
}

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    let store = create_lattice(10000);
    let Some(seed) = store.get(&id(5000)) else {
        return;
    };

    for depth in [1, 5, 20].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            b.iter(|| black_box(build_graph(&store, seed, depth)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_build_graph);
criterion_main!(benches);
