#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DISCORD_EPOCH_MILLIS, Error, ForgedSnowflake, RandSource, Result, SnowflakeForge, TimeSource,
    TokenGrammar, encode_standard, encode_u32, random_string,
};
use core::fmt;

/// Default probability of forging an MFA token in a batch.
pub const DEFAULT_MFA_PROBABILITY: f64 = 0.025;

/// Substitutes for the first `=` of the snowflake segment.
const PADDING_REPAIR: &[u8] = b"xyzXYZ23";
/// Substitutes for a trailing `w` of the snowflake segment.
const TAIL_REPAIR: &[u8] = b"xyzXYZ23o";
/// Substitutes for an `X` in the timestamp segment.
const STAMP_REPAIR: &[u8] = b"XY";

/// The tail repair fires when a unit draw lands strictly inside this window
/// (10% of draws).
const TAIL_REPAIR_WINDOW: (f64, f64) = (0.45, 0.55);

/// Signature and MFA blob are sliced from one character into a longer random
/// string.
const SIGNATURE_SOURCE_LEN: usize = 32;
const SIGNATURE_LEN: usize = 27;
const MFA_SOURCE_LEN: usize = 96;
const MFA_BLOB_LEN: usize = 84;
const MFA_PREFIX: &str = "mfa.";

/// A token that passed its structural check.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "token", rename_all = "lowercase")
)]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Forged {
    /// `<snowflake>.<timestamp>.<signature>`
    General(String),
    /// `mfa.<84 chars>`
    Mfa(String),
}

impl Forged {
    pub fn as_str(&self) -> &str {
        match self {
            Self::General(token) | Self::Mfa(token) => token,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::General(token) | Self::Mfa(token) => token,
        }
    }

    pub fn is_mfa(&self) -> bool {
        matches!(self, Self::Mfa(_))
    }
}

impl fmt::Display for Forged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forges bearer-token strings that pass [`TokenGrammar`] checks.
///
/// Every forge call is a single generate, repair, validate pass with no state
/// carried between calls. A pass that does not validate yields `Ok(None)`;
/// [`TokenForge::forge_with_retries`] wraps that in a bounded retry loop.
///
/// # Example
/// ```
/// use flakeforge::{DEFAULT_MFA_PROBABILITY, SystemClock, ThreadRandom, TokenForge};
///
/// let forge = TokenForge::new(ThreadRandom, SystemClock);
/// let token = forge.forge_with_retries(DEFAULT_MFA_PROBABILITY, 64).unwrap();
/// println!("{token}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TokenForge<R, T> {
    snowflakes: SnowflakeForge<R, T>,
}

impl<R, T> TokenForge<R, T>
where
    R: RandSource,
    T: TimeSource<i64>,
{
    pub fn new(rand: R, time: T) -> Self {
        Self {
            snowflakes: SnowflakeForge::new(rand, time),
        }
    }

    /// The snowflake forge sharing this forge's random and time sources.
    pub fn snowflakes(&self) -> &SnowflakeForge<R, T> {
        &self.snowflakes
    }

    /// Shorthand for `self.snowflakes().generate()`.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeForge::generate`].
    pub fn generate_snowflake(&self) -> Result<ForgedSnowflake> {
        self.snowflakes.generate()
    }

    /// Forges a general token for a snowflake produced by
    /// [`TokenForge::generate_snowflake`].
    ///
    /// # Errors
    ///
    /// See [`TokenForge::forge_token`].
    pub fn forge_token_for(&self, snowflake: &ForgedSnowflake) -> Result<Option<String>> {
        self.forge_token(snowflake.timestamp_offset_ms, &snowflake.decimal())
    }

    /// Assembles `A.B.C` where `A` is the standard base64 of `snowflake`, `B`
    /// the compact encoding of a Unix-seconds time no earlier than the
    /// snowflake's own, and `C` a 27-character random fragment. Three repair
    /// passes then nudge the candidate toward [`TokenGrammar::General`]:
    ///
    /// 1. if the candidate fails, the first `=` of `A` becomes one of
    ///    `xyzXYZ23`;
    /// 2. with 10% probability, a trailing `w` of `A` becomes one of
    ///    `xyzXYZ23o`;
    /// 3. the first `X` of `B` becomes `X` or `Y`.
    ///
    /// Returns `Ok(None)` if the repaired candidate still fails the grammar.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRange`] if the snowflake's time lies after now
    /// - [`Error::TimestampOverflow`] if now does not fit in 32-bit seconds
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn forge_token(&self, timestamp_offset_ms: i64, snowflake: &str) -> Result<Option<String>> {
        let rand = self.snowflakes.rand();
        let now = self.snowflakes.time().current_millis();

        let earliest = timestamp_offset_ms.saturating_add(DISCORD_EPOCH_MILLIS);
        let millis = rand.uniform_int(earliest, now)?;
        let seconds = round_millis_to_seconds(millis);
        let seconds = u32::try_from(seconds).map_err(|_| Error::TimestampOverflow { seconds })?;

        let signature = random_string(rand, SIGNATURE_SOURCE_LEN)[1..=SIGNATURE_LEN].to_owned();

        let mut id_part = encode_standard(snowflake);
        let mut stamp_part = encode_u32(seconds);

        if !TokenGrammar::General.is_match(&join(&id_part, &stamp_part, &signature)) {
            if let Some(pos) = id_part.find('=') {
                let c = char::from(*rand.choose(PADDING_REPAIR)?);
                id_part.replace_range(pos..=pos, c.encode_utf8(&mut [0; 4]));
                #[cfg(feature = "tracing")]
                tracing::trace!(%id_part, "replaced padding in snowflake segment");
            }
        }

        let p = rand.random_unit();
        if TAIL_REPAIR_WINDOW.0 < p && p < TAIL_REPAIR_WINDOW.1 && id_part.ends_with('w') {
            let c = char::from(*rand.choose(TAIL_REPAIR)?);
            id_part.pop();
            id_part.push(c);
        }

        if let Some(pos) = stamp_part.find('X') {
            let c = char::from(*rand.choose(STAMP_REPAIR)?);
            stamp_part.replace_range(pos..=pos, c.encode_utf8(&mut [0; 4]));
        }

        let candidate = join(&id_part, &stamp_part, &signature);
        if TokenGrammar::General.is_match(&candidate) {
            Ok(Some(candidate))
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(%candidate, "forged token failed structural check");
            Ok(None)
        }
    }

    /// Forges `mfa.` followed by 84 random URL-safe characters.
    ///
    /// There is no repair pass; `None` means the blob did not satisfy
    /// [`TokenGrammar::Mfa`], which a conforming [`RandSource`] never causes.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn forge_mfa_token(&self) -> Option<String> {
        let blob = random_string(self.snowflakes.rand(), MFA_SOURCE_LEN);
        let candidate = format!("{MFA_PREFIX}{}", &blob[1..=MFA_BLOB_LEN]);
        TokenGrammar::Mfa.is_match(&candidate).then_some(candidate)
    }

    /// With probability `mfa_probability` attempts an MFA token, otherwise a
    /// fresh snowflake and a general token.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidProbability`] unless `0 <= mfa_probability <= 1`
    /// - anything [`SnowflakeForge::generate`] or [`TokenForge::forge_token`]
    ///   returns
    pub fn forge_token_or_mfa(&self, mfa_probability: f64) -> Result<Option<Forged>> {
        if !(0.0..=1.0).contains(&mfa_probability) {
            return Err(Error::InvalidProbability {
                value: mfa_probability,
            });
        }

        if self.snowflakes.rand().random_unit() < mfa_probability {
            return Ok(self.forge_mfa_token().map(Forged::Mfa));
        }

        let snowflake = self.generate_snowflake()?;
        Ok(self.forge_token_for(&snowflake)?.map(Forged::General))
    }

    /// Calls [`TokenForge::forge_token_or_mfa`] until it yields a token, at
    /// most `max_attempts` times.
    ///
    /// # Errors
    ///
    /// - [`Error::RetriesExhausted`] if every attempt failed its check
    /// - any error of [`TokenForge::forge_token_or_mfa`], returned immediately
    pub fn forge_with_retries(&self, mfa_probability: f64, max_attempts: usize) -> Result<Forged> {
        for _attempt in 1..=max_attempts {
            if let Some(token) = self.forge_token_or_mfa(mfa_probability)? {
                return Ok(token);
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(attempt = _attempt, max_attempts, "forge attempt rejected");
        }
        Err(Error::RetriesExhausted {
            attempts: max_attempts,
        })
    }
}

fn join(id_part: &str, stamp_part: &str, signature: &str) -> String {
    format!("{id_part}.{stamp_part}.{signature}")
}

/// Milliseconds to seconds, rounding halves up.
fn round_millis_to_seconds(millis: i64) -> i64 {
    millis.saturating_add(500).div_euclid(1000)
}
