//! Benchmarks for classification and allergen resolution.
//!
//! Run with: cargo bench --bench classify_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use recipe_revision::diff::{ChangeClassifier, Resolver};
use recipe_revision::model::{
    Allergen, CatalogAttributes, ComponentEntry, InMemoryCatalog, MethodStep, Snapshot, Version,
};
use std::hint::black_box;

/// Build a catalog where every item carries one standard allergen.
fn generate_catalog(count: usize) -> InMemoryCatalog {
    (0..count).fold(InMemoryCatalog::new(), |catalog, i| {
        let allergen = Allergen::ALL[i % Allergen::ALL.len()];
        catalog.with_item(format!("item-{i}"), CatalogAttributes::new().containing(allergen))
    })
}

fn generate_snapshot(count: usize) -> Snapshot {
    let mut snapshot = Snapshot::new("Benchmark loaf", Version::new(1, 0, 0));
    snapshot.components = (0..count)
        .map(|i| ComponentEntry::ingredient(format!("item-{i}"), format!("Ingredient {i}")))
        .collect();
    snapshot.method_steps = (0..20).map(|i| MethodStep::new(format!("Step {i}"))).collect();
    snapshot.yield_amount = 10.0;
    snapshot.yield_unit = "portions".to_string();
    snapshot
}

/// Two snapshots where a tenth of the components were swapped.
fn generate_pair(count: usize) -> (Snapshot, Snapshot) {
    let previous = generate_snapshot(count);
    let mut current = previous.clone();
    let swaps = (count / 10).max(1);
    current.components.truncate(count - swaps);
    current.components.extend(
        (count..count + swaps)
            .map(|i| ComponentEntry::ingredient(format!("item-{i}"), format!("Ingredient {i}"))),
    );
    current.method_steps[3].instruction = "Step 3, gently".to_string();
    (previous, current)
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [10, 100, 1000] {
        let catalog = generate_catalog(size + size / 10 + 1);
        let (previous, current) = generate_pair(size);
        let classifier = ChangeClassifier::new();

        group.bench_with_input(BenchmarkId::new("changed", size), &size, |b, _| {
            b.iter(|| {
                classifier
                    .classify(black_box(&previous), black_box(&current), &catalog, &catalog)
                    .expect("classification")
            });
        });
        group.bench_with_input(BenchmarkId::new("identical", size), &size, |b, _| {
            b.iter(|| {
                classifier
                    .classify(black_box(&previous), black_box(&previous), &catalog, &catalog)
                    .expect("classification")
            });
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let catalog = generate_catalog(2000);
    let snapshot = generate_snapshot(2000);
    for threshold in [1, usize::MAX] {
        let resolver = Resolver::new(&catalog, &catalog).with_parallel_threshold(threshold);
        let label = if threshold == 1 { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| resolver.resolve(black_box(&snapshot.components)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_resolve);
criterion_main!(benches);
