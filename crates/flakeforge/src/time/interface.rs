use core::time::Duration;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
///
/// Every forged snowflake timestamp is an offset from this instant.
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// [`DISCORD_EPOCH`] as signed milliseconds since the Unix epoch.
pub const DISCORD_EPOCH_MILLIS: i64 = DISCORD_EPOCH.as_millis() as i64;

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The unit is **milliseconds since the Unix epoch**. Forging needs the
/// absolute time, since both the snowflake offset range and the token's
/// seconds segment are derived from it.
///
/// # Example
///
/// ```
/// use flakeforge::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<i64> for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

impl<T, S: TimeSource<T> + ?Sized> TimeSource<T> for &S {
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}
