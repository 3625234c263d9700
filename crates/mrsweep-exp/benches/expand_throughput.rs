use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use mrsweep_exp::{expand, SweepSpecification};
use serde_json::{json, Value};

fn wide_sweep() -> SweepSpecification {
    let raw: IndexMap<String, Value> = [
        ("number_of_mappers", json!([2, 4, 8, 16])),
        ("number_of_reducers", json!([1, 2, 4])),
        ("shuffle_copies", json!([5, 10, 20])),
        ("max_split_size", json!(["64MB", "128MB", "256MB"])),
        ("should_compress", json!([true, false])),
        ("map_compress_codec", json!(["snappy", "gzip"])),
        ("output_path", json!("/bench")),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();
    SweepSpecification::normalize(&raw).expect("normalize bench sweep")
}

fn expand_benchmark(c: &mut Criterion) {
    let spec = wide_sweep();
    c.bench_function("expand_432_jobs", |b| {
        b.iter(|| {
            let grid = expand(black_box(&spec)).expect("expand");
            black_box(grid.len());
        });
    });
    let grid = expand(&spec).expect("expand");
    c.bench_function("render_argument_vectors", |b| {
        b.iter(|| {
            for entry in &grid {
                black_box(entry.config().to_argument_vector());
            }
        });
    });
}

criterion_group!(benches, expand_benchmark);
criterion_main!(benches);
