//! Error types for synthetic identifier and token forging.
//!
//! A forge attempt that fails its structural check is *not* an error: the
//! forging functions report it as `Ok(None)` and leave retrying to the
//! caller (or to [`TokenForge::forge_with_retries`]). The variants below cover
//! the cases that must abort the calling operation instead.
//!
//! [`TokenForge::forge_with_retries`]: crate::TokenForge::forge_with_retries

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `flakeforge` can produce.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A uniform integer was requested over an empty range.
    ///
    /// The usual cause is a clock that reports a time before
    /// [`DISCORD_EPOCH`]. The range is never clamped, since a clamped
    /// timestamp would no longer fit the snowflake bit layout.
    ///
    /// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
    #[error("invalid range: max ({max}) < min ({min})")]
    InvalidRange { min: i64, max: i64 },

    /// A Unix-seconds timestamp does not fit in the 32-bit token segment.
    #[error("timestamp {seconds}s does not fit in 32 bits")]
    TimestampOverflow { seconds: i64 },

    /// A probability outside `[0, 1]` was supplied.
    #[error("probability {value} is outside [0, 1]")]
    InvalidProbability { value: f64 },

    /// Every bounded forge attempt failed its structural check.
    #[error("no well-formed token after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    /// A string could not be parsed as a decimal snowflake.
    #[error("invalid snowflake: {input:?}")]
    ParseSnowflake { input: String },
}
