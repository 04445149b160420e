use super::interface::check_range;
use crate::{RandSource, Result};
use ::rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically. Nothing in this crate relies on that
/// strength; it is simply the default generator.
///
/// ⚠️ NOTE: The underlying `ThreadRng` is not `Send` or `Sync`. This type
/// does not store it and instead reaches the thread-local generator on each
/// call, so it **is** thread-safe and may be freely shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn uniform_int(&self, min: i64, max: i64) -> Result<i64> {
        check_range(min, max)?;
        Ok(rng().random_range(min..=max))
    }

    fn random_u32(&self) -> u32 {
        rng().random()
    }
}
