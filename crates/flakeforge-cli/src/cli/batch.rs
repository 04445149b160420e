use super::config::GenerateConfig;
use anyhow::anyhow;
use flakeforge::{
    FixedClock, Forged, RandSource, SeededRandom, SystemClock, ThreadRandom, TimeSource, TokenForge,
};
use std::thread::scope;

/// Per-worker entropy: the thread-local RNG, or a seeded one when the run
/// must be reproducible.
pub enum Entropy {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl Entropy {
    pub fn for_worker(seed: Option<u64>, worker: usize) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededRandom::new(seed.wrapping_add(worker as u64))),
            None => Self::Thread(ThreadRandom),
        }
    }
}

impl RandSource for Entropy {
    fn uniform_int(&self, min: i64, max: i64) -> flakeforge::Result<i64> {
        match self {
            Self::Thread(r) => r.uniform_int(min, max),
            Self::Seeded(r) => r.uniform_int(min, max),
        }
    }

    fn random_u32(&self) -> u32 {
        match self {
            Self::Thread(r) => r.random_u32(),
            Self::Seeded(r) => r.random_u32(),
        }
    }
}

/// The wall clock, or a pinned instant when `--now-ms` is given.
#[derive(Clone, Copy)]
pub enum Clock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock {
    pub fn new(now_ms: Option<i64>) -> Self {
        match now_ms {
            Some(millis) => Self::Fixed(FixedClock { millis }),
            None => Self::System(SystemClock),
        }
    }
}

impl TimeSource<i64> for Clock {
    fn current_millis(&self) -> i64 {
        match self {
            Self::System(c) => c.current_millis(),
            Self::Fixed(c) => c.current_millis(),
        }
    }
}

/// Number of tokens worker `worker` of `workers` forges out of `count`.
///
/// The first `count % workers` workers take one extra.
pub fn share_of(count: usize, workers: usize, worker: usize) -> usize {
    count / workers + usize::from(worker < count % workers)
}

/// Forges `config.count` tokens across `config.workers` threads.
///
/// Tokens are returned grouped by worker, in worker order. A run with a seed
/// and a pinned clock is reproducible for a fixed worker count.
pub fn forge_batch(config: &GenerateConfig) -> anyhow::Result<Vec<Forged>> {
    let results: Vec<anyhow::Result<Vec<Forged>>> = scope(|s| {
        let handles: Vec<_> = (0..config.workers)
            .map(|worker| {
                let share = share_of(config.count, config.workers, worker);
                s.spawn(move || forge_share(config, worker, share))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow!("worker {worker} panicked"))?
            })
            .collect()
    });

    let mut tokens = Vec::with_capacity(config.count);
    for result in results {
        tokens.extend(result?);
    }
    Ok(tokens)
}

fn forge_share(
    config: &GenerateConfig,
    worker: usize,
    share: usize,
) -> anyhow::Result<Vec<Forged>> {
    let forge = TokenForge::new(
        Entropy::for_worker(config.seed, worker),
        Clock::new(config.now_ms),
    );

    let tokens = (0..share)
        .map(|_| forge.forge_with_retries(config.mfa_probability, config.max_attempts))
        .collect::<flakeforge::Result<Vec<_>>>()?;

    tracing::debug!(worker, forged = tokens.len(), "Worker finished");
    Ok(tokens)
}
