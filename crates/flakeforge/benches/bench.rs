use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use flakeforge::{
    DEFAULT_MFA_PROBABILITY, RandSource, SeededRandom, SnowflakeForge, SystemClock, ThreadRandom,
    TimeSource, TokenForge, encode_u32, random_string,
};
use std::{thread::scope, time::Instant};

struct FixedMockTime {
    millis: i64,
}

impl TimeSource<i64> for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

// Number of items produced per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL: usize = 4096;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(TOTAL as u64));

    group.bench_function(format!("encode_u32/elems/{TOTAL}"), |b| {
        b.iter(|| {
            for n in 0..TOTAL as u32 {
                black_box(encode_u32(black_box(n.wrapping_mul(2_654_435_761))));
            }
        });
    });

    let rand = ThreadRandom;
    group.bench_function(format!("random_string_96/elems/{TOTAL}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL {
                black_box(random_string(&rand, 96));
            }
        });
    });

    group.finish();
}

fn bench_snowflakes(c: &mut Criterion) {
    let mut group = c.benchmark_group("snowflake");
    group.throughput(Throughput::Elements(TOTAL as u64));

    let forge = SnowflakeForge::new(ThreadRandom, FixedMockTime {
        millis: 1_700_000_000_000,
    });
    group.bench_function(format!("generate/elems/{TOTAL}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL {
                black_box(forge.generate().unwrap());
            }
        });
    });

    group.finish();
}

fn bench_forge<R: RandSource + Sync>(c: &mut Criterion, group_name: &str, rand: R) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL as u64));

    let forge = TokenForge::new(rand, SystemClock);

    group.bench_function(format!("forge_with_retries/elems/{TOTAL}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL {
                black_box(forge.forge_with_retries(DEFAULT_MFA_PROBABILITY, 64).unwrap());
            }
        });
    });

    group.bench_function(format!("forge_mfa_token/elems/{TOTAL}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL {
                black_box(forge.forge_mfa_token());
            }
        });
    });

    group.finish();
}

fn bench_forge_threaded(c: &mut Criterion) {
    let threads = std::thread::available_parallelism().map_or(4, |n| n.get());
    let mut group = c.benchmark_group("mt/thread_random");
    group.throughput(Throughput::Elements((TOTAL * threads) as u64));

    let forge = TokenForge::new(ThreadRandom, SystemClock);
    group.bench_function(format!("threads/{threads}/elems/{TOTAL}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            for _ in 0..TOTAL {
                                black_box(
                                    forge.forge_with_retries(DEFAULT_MFA_PROBABILITY, 64).unwrap(),
                                );
                            }
                        });
                    }
                });
            }
            start.elapsed()
        });
    });

    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_codec(c);
    bench_snowflakes(c);
    bench_forge(c, "forge/thread_random", ThreadRandom);
    bench_forge(c, "forge/seeded", SeededRandom::new(42));
    bench_forge_threaded(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
