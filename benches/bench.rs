use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fifo_map::FifoMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 2] = [100, 1_000];

fn rng() -> StdRng { StdRng::seed_from_u64(42) }

fn filled(n: usize, rng: &mut StdRng) -> (FifoMap<usize, usize>, Vec<usize>) {
    let mut map = FifoMap::new();
    let keys: Vec<usize> = (0..n).map(|_| rng.gen::<usize>() % n).collect();
    for &k in &keys { map.insert(k, k); }
    (map, keys)
}

fn insert_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_rand");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = rng();
            let (mut map, _) = filled(n, &mut rng);

            b.iter(|| {
                let k = rng.gen::<usize>() % n;
                map.insert(k, k);
            });
            black_box(map);
        });
    }

    group.finish();
}

fn insert_seq(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_seq");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut map = FifoMap::new();
                for i in 0..n { map.insert(i, i); }
                map
            });
        });
    }

    group.finish();
}

fn find_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_rand");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = rng();
            let (map, mut keys) = filled(n, &mut rng);
            keys.shuffle(&mut rng);

            let mut i = 0;
            b.iter(|| {
                let t = map.get(&keys[i]);
                i = (i + 1) % n;
                black_box(t);
            });
        });
    }

    group.finish();
}

fn remove_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_reinsert");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = rng();
            let (mut map, keys) = filled(n, &mut rng);

            let mut i = 0;
            b.iter(|| {
                let k = keys[i];
                if let Some(v) = map.remove(&k) { map.insert(k, v); }
                i = (i + 1) % n;
            });
        });
    }

    group.finish();
}

fn iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");

    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let (map, _) = filled(n, &mut rng());

            b.iter(|| {
                for entry in map.iter() { black_box(entry); }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, insert_rand, insert_seq, find_rand, remove_reinsert, iter);
criterion_main!(benches);
