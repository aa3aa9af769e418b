use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gritsort::{collect_keys, rotate, Config, Engine};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_u64(len: usize, distinct: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    (0..len).map(|_| rng.gen_range(0..distinct)).collect()
}

fn bench_rotate(c: &mut Criterion) {
    let mut v: Vec<u64> = (0..100_000).collect();

    c.bench_function("rotate_100k_uneven", |b| {
        b.iter(|| rotate(black_box(v.as_mut_slice()), 0, 31_337, 68_663))
    });
}

fn bench_collect_keys(c: &mut Criterion) {
    let input = random_u64(100_000, 1_000);

    c.bench_function("collect_keys_100k_ideal_316", |b| {
        b.iter_batched_ref(
            || input.clone(),
            |v| {
                let len = v.len();
                collect_keys(v, 0, len, 316, &mut |a: &u64, b: &u64| a < b)
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_sort(c: &mut Criterion) {
    let input = random_u64(100_000, u64::MAX);

    for (name, config) in [
        ("sort_100k_scratch", Config::default()),
        ("sort_100k_in_place", Config::without_scratch()),
    ] {
        let mut engine = Engine::with_config(|a: &u64, b: &u64| a < b, config);

        c.bench_function(name, |b| {
            b.iter_batched_ref(|| input.clone(), |v| engine.sort(v), BatchSize::LargeInput)
        });
    }
}

criterion_group!(benches, bench_rotate, bench_collect_keys, bench_sort);
criterion_main!(benches);
