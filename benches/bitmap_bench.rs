// In benches/bitmap_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arrow_host::host::column;
use arrow_host::null_handling::{pack, unpack};
use arrow_host::proxy::factory::{ProxyRegistry, FLOAT64_ARRAY};
use arrow_host::proxy::{DATA_ARG, VALID_ARG};
use arrow_host::{FunctionArguments, HostConfig, HostValue};
use std::sync::Arc;

/// Generates a validity mask with roughly one null in every seven elements.
fn generate_validity(size: usize) -> Vec<bool> {
    (0..size).map(|i| i % 7 != 3).collect()
}

// --- Benchmark Suite ---

const BENCH_ELEMENTS: usize = 65536;

fn bench_bitmap_codec(c: &mut Criterion) {
    let validity = generate_validity(BENCH_ELEMENTS);
    let packed = pack(&validity).unwrap();

    let mut group = c.benchmark_group("Validity Bitmap Codec");
    group.throughput(criterion::Throughput::Elements(BENCH_ELEMENTS as u64));

    group.bench_function("pack", |b| b.iter(|| black_box(pack(black_box(&validity)))));
    group.bench_function("unpack", |b| {
        b.iter(|| black_box(unpack(black_box(packed.as_slice()), BENCH_ELEMENTS)))
    });

    group.finish();
}

fn bench_make_proxy(c: &mut Criterion) {
    let registry = ProxyRegistry::with_defaults(Arc::new(HostConfig::default()));
    let data: Vec<f64> = (0..BENCH_ELEMENTS).map(|i| i as f64).collect();
    let args = FunctionArguments::new()
        .with(DATA_ARG, HostValue::Float64(column(data).unwrap()))
        .with(VALID_ARG, HostValue::Bool(column(generate_validity(BENCH_ELEMENTS)).unwrap()));

    let mut group = c.benchmark_group("Proxy Construction");
    group.throughput(criterion::Throughput::Elements(BENCH_ELEMENTS as u64));

    // Construction is zero-copy for the payload; only the bitmap is packed.
    group.bench_function("make Float64Array", |b| {
        b.iter(|| black_box(registry.make_proxy(FLOAT64_ARRAY, black_box(&args))))
    });

    let proxy = registry.make_proxy(FLOAT64_ARRAY, &args).unwrap();
    group.bench_function("toHost Float64Array", |b| b.iter(|| black_box(proxy.to_host())));

    group.finish();
}

criterion_group!(benches, bench_bitmap_codec, bench_make_proxy);
criterion_main!(benches);
