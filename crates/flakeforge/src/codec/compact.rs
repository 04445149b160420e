//! Compact URL-safe base64 fragments.
//!
//! A `u32` is written as its 4 big-endian bytes and base64-encoded. A padded
//! encoder would emit 8 characters (`xxxxxx==`); only the first 6 carry data,
//! so the fragment is exactly those 6 characters with `+` replaced by `-` and
//! `/` by `_`. This is precisely the unpadded URL-safe encoding of 4 bytes.

use crate::RandSource;
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

/// Length of an encoded `u32` fragment.
pub const COMPACT_LEN: usize = 6;

/// Encodes `n` into a fixed 6-character URL-safe base64 fragment.
///
/// # Example
/// ```
/// use flakeforge::encode_u32;
///
/// assert_eq!(encode_u32(0), "AAAAAA");
/// assert_eq!(encode_u32(u32::MAX), "_____w");
/// ```
pub fn encode_u32(n: u32) -> String {
    let mut buf = [0_u8; COMPACT_LEN];
    encode_u32_to_buf(n, &mut buf);
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Zero-allocation variant of [`encode_u32`].
pub fn encode_u32_to_buf(n: u32, buf: &mut [u8; COMPACT_LEN]) {
    let written = URL_SAFE_NO_PAD
        .encode_slice(n.to_be_bytes(), buf)
        .expect("4 bytes encode to 6 chars");
    debug_assert_eq!(written, COMPACT_LEN);
}

/// Concatenates fragments of fresh random `u32`s until at least `min_len`
/// characters have accumulated.
///
/// The result length is the smallest multiple of 6 that is `>= min_len`
/// (so `0` yields an empty string). Callers needing an exact length slice the
/// result themselves.
pub fn random_string<R: RandSource + ?Sized>(rand: &R, min_len: usize) -> String {
    let mut out = String::with_capacity(min_len.div_ceil(COMPACT_LEN) * COMPACT_LEN);
    let mut buf = [0_u8; COMPACT_LEN];
    while out.len() < min_len {
        encode_u32_to_buf(rand.random_u32(), &mut buf);
        out.extend(buf.iter().map(|&b| char::from(b)));
    }
    out
}

/// Standard-alphabet, padded base64 of `bytes`, as a generic encoder emits it.
pub fn encode_standard(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SeededRandom, ThreadRandom};

    /// The same fragment, built the long way from a padded standard encoding.
    fn via_padded_standard(n: u32) -> String {
        STANDARD.encode(n.to_be_bytes())[..COMPACT_LEN]
            .replace('+', "-")
            .replace('/', "_")
    }

    #[test]
    fn encode_zero_is_all_a() {
        assert_eq!(encode_u32(0), "AAAAAA");
    }

    #[test]
    fn encode_substitutes_url_safe_characters() {
        // 0xFBEFBEFB encodes to "+++++w==" under the standard alphabet.
        assert_eq!(encode_u32(0xFBEF_BEFB), "-----w");
        assert_eq!(encode_u32(u32::MAX), "_____w");
    }

    #[test]
    fn encode_matches_truncated_padded_encoding() {
        let rand = SeededRandom::new(99);
        for n in [0, 1, 42, 0xFF00_FF00, 0x1234_5678, u32::MAX] {
            assert_eq!(encode_u32(n), via_padded_standard(n), "n = {n:#x}");
        }
        for _ in 0..1_000 {
            let n = rand.random_u32();
            assert_eq!(encode_u32(n), via_padded_standard(n), "n = {n:#x}");
        }
    }

    #[test]
    fn encode_is_deterministic_and_url_safe() {
        let rand = ThreadRandom;
        for _ in 0..1_000 {
            let n = rand.random_u32();
            let a = encode_u32(n);
            assert_eq!(a, encode_u32(n));
            assert_eq!(a.len(), COMPACT_LEN);
            assert!(!a.contains('+') && !a.contains('/') && !a.contains('='));
        }
    }

    #[test]
    fn encode_to_buf_overwrites_every_byte() {
        let mut buf = [b'?'; COMPACT_LEN];
        encode_u32_to_buf(0xFBEF_BEFB, &mut buf);
        assert_eq!(&buf, b"-----w");
        encode_u32_to_buf(0, &mut buf);
        assert_eq!(&buf, b"AAAAAA");
    }

    #[test]
    fn random_string_length_is_smallest_covering_multiple_of_six() {
        let rand = ThreadRandom;
        for min_len in 0..=100 {
            let s = random_string(&rand, min_len);
            assert_eq!(s.len() % COMPACT_LEN, 0);
            assert!(s.len() >= min_len);
            assert!(s.len() < min_len + COMPACT_LEN);
        }
    }

    #[test]
    fn random_string_only_uses_url_safe_alphabet() {
        let s = random_string(&ThreadRandom, 600);
        assert!(
            s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        );
    }

    #[test]
    fn standard_encoding_keeps_padding() {
        assert_eq!(encode_standard("1"), "MQ==");
        assert_eq!(encode_standard("175928847299117063"), "MTc1OTI4ODQ3Mjk5MTE3MDYz");
    }
}
