//! Benchmarks for graph construction and ordering performance
//!
//! Tests build and query performance with large file sets to ensure
//! analysis stays interactive for projects with 1000+ files.

use buildgraph::file::AnalysedFile;
use buildgraph::graph::DependencyGraph;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Create a layered acyclic file set where each file depends on up to
/// `deps_per_file` of its predecessors.
fn create_layered_files(total_files: usize, deps_per_file: usize) -> Vec<AnalysedFile> {
    (0..total_files)
        .map(|i| {
            let deps = (1..=deps_per_file)
                .filter_map(|d| i.checked_sub(d))
                .map(|target| format!("file-{}.c", target))
                .collect();
            AnalysedFile::new(format!("file-{}.c", i), deps)
        })
        .collect()
}

/// Create a file set made of dependency rings of `ring_size` files each,
/// so cycle detection has real work to do.
fn create_ring_files(total_files: usize, ring_size: usize) -> Vec<AnalysedFile> {
    (0..total_files)
        .map(|i| {
            let ring_start = i - (i % ring_size);
            let next = if (i + 1) % ring_size == 0 || i + 1 >= total_files {
                ring_start
            } else {
                i + 1
            };
            AnalysedFile::new(format!("file-{}.c", i), vec![format!("file-{}.c", next)])
        })
        .collect()
}

/// Benchmark graph construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 500, 1000, 5000].iter() {
        let files = create_layered_files(*size, 4);

        group.bench_with_input(BenchmarkId::new("files", size), size, |b, _| {
            b.iter(|| black_box(DependencyGraph::build(files.clone()).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark topological ordering on acyclic graphs
fn bench_topological_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("topological_order");

    for size in [100, 500, 1000, 5000].iter() {
        let graph = DependencyGraph::build(create_layered_files(*size, 4)).unwrap();

        group.bench_with_input(BenchmarkId::new("files", size), size, |b, _| {
            b.iter(|| black_box(graph.topological_order().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark cycle enumeration on graphs full of rings
fn bench_find_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_cycles");

    for size in [100, 500, 1000, 5000].iter() {
        let graph = DependencyGraph::build(create_ring_files(*size, 10)).unwrap();

        group.bench_with_input(BenchmarkId::new("files", size), size, |b, _| {
            b.iter(|| black_box(graph.find_cycles()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_topological_order,
    bench_find_cycles
);
criterion_main!(benches);
