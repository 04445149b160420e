use crate::{Error, Result};

/// A trait for random sources used by every forging component.
///
/// This abstraction allows you to plug in a real random source or a scripted
/// random source in tests. Implementations hold no state that the forging
/// components depend on, so a single source may be shared across components
/// (see the blanket impl for `&R`).
///
/// # Example
/// ```
/// use flakeforge::{RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn uniform_int(&self, min: i64, _max: i64) -> Result<i64> {
///         Ok(min)
///     }
///
///     fn random_u32(&self) -> u32 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.uniform_int(3, 9).unwrap(), 3);
/// assert_eq!(rng.random_u32(), 1234);
/// ```
pub trait RandSource {
    /// Returns an integer uniformly distributed over `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `max < min`.
    fn uniform_int(&self, min: i64, max: i64) -> Result<i64>;

    /// Returns a value uniformly distributed over `0..=u32::MAX`.
    fn random_u32(&self) -> u32;

    /// Returns a value in `[0, 1)`.
    ///
    /// Derived from [`RandSource::random_u32`] so that scripted sources steer
    /// probability draws through the same seam as raw entropy.
    fn random_unit(&self) -> f64 {
        f64::from(self.random_u32()) / 4_294_967_296.0
    }

    /// Returns an element of `items` picked uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `items` is empty.
    fn choose<'a, T>(&self, items: &'a [T]) -> Result<&'a T> {
        let max = i64::try_from(items.len()).unwrap_or(i64::MAX) - 1;
        let i = self.uniform_int(0, max)?;
        usize::try_from(i)
            .ok()
            .and_then(|i| items.get(i))
            .ok_or(Error::InvalidRange { min: 0, max })
    }
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn uniform_int(&self, min: i64, max: i64) -> Result<i64> {
        (**self).uniform_int(min, max)
    }

    fn random_u32(&self) -> u32 {
        (**self).random_u32()
    }

    fn random_unit(&self) -> f64 {
        (**self).random_unit()
    }
}

/// Rejects empty ranges before they reach an RNG, which would panic.
pub(crate) fn check_range(min: i64, max: i64) -> Result<()> {
    if max < min {
        return Err(Error::InvalidRange { min, max });
    }
    Ok(())
}
