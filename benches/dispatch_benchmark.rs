use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use polysort::{sort, sort_floats, sort_integers, sort_strings, Value};
use rand::Rng;
use std::hint::black_box;

const COUNT: usize = 100_000;

fn bench_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Integer Sort");
    group.sample_size(10);

    let mut rng = rand::thread_rng();
    let input: Vec<i64> = (0..COUNT)
        .map(|_| rng.gen_range(-1_000_000_000..=1_000_000_000))
        .collect();

    group.bench_function("radix (sort_integers)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| sort_integers(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_floats(c: &mut Criterion) {
    let mut group = c.benchmark_group("Float Sort");
    group.sample_size(10);

    let mut rng = rand::thread_rng();
    let input: Vec<f64> = (0..COUNT).map(|_| rng.gen_range(-1000.0..1000.0)).collect();

    group.bench_function("radix (sort_floats)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| sort_floats(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort_unstable_by(total_cmp)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable_by(|a, b| a.total_cmp(b)),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("String Sort");
    group.sample_size(10);

    let mut rng = rand::thread_rng();
    let input: Vec<String> = (0..COUNT)
        .map(|_| {
            let len = rng.gen_range(5..=15);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect();

    group.bench_function("three-way quicksort (sort_strings)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| sort_strings(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");
    group.sample_size(10);

    let mut rng = rand::thread_rng();
    let ints: Vec<Value> = (0..COUNT).map(|_| Value::Int(rng.gen())).collect();
    let mixed: Vec<Value> = (0..COUNT)
        .map(|i| {
            if i % 2 == 0 {
                Value::Int(rng.gen())
            } else {
                Value::Float(rng.gen())
            }
        })
        .collect();

    group.bench_function("homogeneous ints", |b| b.iter(|| sort(black_box(&ints))));
    group.bench_function("mixed ints and floats (fallback)", |b| {
        b.iter(|| sort(black_box(&mixed)))
    });

    group.finish();
}

criterion_group!(benches, bench_integers, bench_floats, bench_strings, bench_dispatch);
criterion_main!(benches);
