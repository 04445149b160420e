#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{DISCORD_EPOCH_MILLIS, Error, RandSource, Result, SnowflakeDiscordId, TimeSource};

/// A freshly manufactured snowflake together with the timestamp offset it was
/// built from.
///
/// The offset travels with the ID because token forging needs a lower bound on
/// time that is consistent with the snowflake's own timestamp.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ForgedSnowflake {
    /// Milliseconds since [`DISCORD_EPOCH`], always `< 2^42`.
    ///
    /// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
    pub timestamp_offset_ms: i64,
    pub id: SnowflakeDiscordId,
}

impl ForgedSnowflake {
    /// The canonical decimal form of the snowflake.
    pub fn decimal(&self) -> String {
        self.id.to_string()
    }
}

/// Manufactures random snowflakes dated between [`DISCORD_EPOCH`] and now.
///
/// ## Features
/// - ✅ Thread-safe when `R` and `T` are (no internal state)
/// - ✅ Deterministic with a seeded or scripted [`RandSource`]
///
/// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
#[derive(Clone, Debug, Default)]
pub struct SnowflakeForge<R, T> {
    rand: R,
    time: T,
}

impl<R, T> SnowflakeForge<R, T>
where
    R: RandSource,
    T: TimeSource<i64>,
{
    /// Creates a forge drawing entropy from `rand` and reading "now" from
    /// `time`.
    ///
    /// # Example
    /// ```
    /// use flakeforge::{SnowflakeForge, SystemClock, ThreadRandom};
    ///
    /// let forge = SnowflakeForge::new(ThreadRandom, SystemClock);
    /// let flake = forge.generate().unwrap();
    /// assert_eq!(flake.id.timestamp() as i64, flake.timestamp_offset_ms);
    /// ```
    pub fn new(rand: R, time: T) -> Self {
        Self { rand, time }
    }

    pub fn rand(&self) -> &R {
        &self.rand
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Draws a timestamp offset in `[0, now - DISCORD_EPOCH]`, a worker ID and
    /// process ID in `[0, 31]` and a sequence in `[0, 4095]`, and packs them.
    ///
    /// The upper bound of the offset is additionally capped at the 42-bit
    /// field maximum, which the wall clock only reaches in the year 2154.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when the clock reads earlier than the
    /// Discord epoch.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<ForgedSnowflake> {
        let elapsed = self
            .time
            .current_millis()
            .saturating_sub(DISCORD_EPOCH_MILLIS)
            .min(SnowflakeDiscordId::max_timestamp() as i64);

        let timestamp = self.draw(elapsed)?;
        let worker_id = self.draw(SnowflakeDiscordId::max_worker_id() as i64)?;
        let process_id = self.draw(SnowflakeDiscordId::max_process_id() as i64)?;
        let sequence = self.draw(SnowflakeDiscordId::max_sequence() as i64)?;

        let id = SnowflakeDiscordId::from_components(timestamp, worker_id, process_id, sequence);
        Ok(ForgedSnowflake {
            timestamp_offset_ms: id.timestamp() as i64,
            id,
        })
    }

    fn draw(&self, max: i64) -> Result<u64> {
        let v = self.rand.uniform_int(0, max)?;
        u64::try_from(v)
            .ok()
            .filter(|_| v <= max)
            .ok_or(Error::InvalidRange { min: 0, max })
    }
}
