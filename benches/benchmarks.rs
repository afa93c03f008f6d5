//! Performance benchmarks for ferro-idres
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- classify

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ferro_idres::{classify, resolve_to_cds, MockStore};

/// Benchmark identifier classification across namespaces
fn bench_classify(c: &mut Criterion) {
    let identifiers = vec![
        ("locus", "kb|g.3899.locus.2"),
        ("mrna", "kb|g.3899.mRNA.2"),
        ("other_internal", "kb|g.3899.CDS.35"),
        ("external", "AT1G01010"),
    ];

    let mut group = c.benchmark_group("classify");
    for (name, id) in identifiers {
        group.bench_function(name, |b| b.iter(|| classify(black_box(id))));
    }
    group.finish();
}

/// Benchmark forward resolution for growing batch sizes
fn bench_resolve(c: &mut Criterion) {
    let mut store = MockStore::new();
    for i in 0..1000 {
        let locus = format!("kb|g.1.locus.{}", i);
        let cds = format!("kb|g.1.CDS.{}", i);
        store.add_locus_cds(locus, &[cds.as_str()]);
    }

    let mut group = c.benchmark_group("resolve_to_cds");
    for size in [10usize, 100, 1000] {
        let batch: Vec<String> = (0..size).map(|i| format!("kb|g.1.locus.{}", i)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("loci_{}", size), |b| {
            b.iter(|| resolve_to_cds(&store, black_box(&batch)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_resolve);
criterion_main!(benches);
