//! Criterion benchmarks for the Fast Doubling core.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fibdrv_core::fastdoubling::fib;
use fibdrv_core::fixed128::{multiply128, multiply64x64_to_128, Fixed128};

fn bench_fib(c: &mut Criterion) {
    let ks: Vec<u64> = vec![10, 93, 186, 500];

    let mut group = c.benchmark_group("FastDoubling");
    for &k in &ks {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| fib(black_box(k)));
        });
    }
    group.finish();
}

fn bench_multiply(c: &mut Criterion) {
    let x = Fixed128::new(0x0123_4567, 0x89ab_cdef_0123_4567);
    let y = Fixed128::new(0x7654_3210, 0xfedc_ba98_7654_3210);

    let mut group = c.benchmark_group("Fixed128");
    group.bench_function("multiply64x64_to_128", |b| {
        b.iter(|| multiply64x64_to_128(black_box(x.lower), black_box(y.lower)));
    });
    group.bench_function("multiply128", |b| {
        b.iter(|| multiply128(black_box(x), black_box(y)));
    });
    group.finish();
}

criterion_group!(benches, bench_fib, bench_multiply);
criterion_main!(benches);
