use regex::Regex;
use std::sync::LazyLock;

// `\w` in `regex` is Unicode-aware; the token alphabet is ASCII only.
static GENERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MNO][A-Za-z0-9_-]{23}\.[A-Za-z0-9_-]{6}\.[A-Za-z0-9_-]{27}")
        .expect("general token pattern compiles")
});

static MFA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mfa\.[A-Za-z0-9_-]{84}")
        .expect("mfa token pattern compiles")
});

/// The structural contracts a forged token must satisfy.
///
/// Matching is **unanchored**: a candidate passes when the pattern occurs
/// anywhere inside it, not only when the whole string conforms. Repair passes
/// are judged against this lax check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenGrammar {
    /// `[MNO]` + 23 chars, `.`, 6 chars, `.`, 27 chars over `[A-Za-z0-9_-]`.
    General,
    /// `mfa.` + 84 chars over `[A-Za-z0-9_-]`.
    Mfa,
}

impl TokenGrammar {
    pub fn is_match(self, candidate: &str) -> bool {
        self.regex().is_match(candidate)
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::General => &*GENERAL,
            Self::Mfa => &*MFA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEG_A: &str = "MTc1OTI4ODQ3Mjk5MTE3MDYz";
    const SEG_B: &str = "YrB9Qw";
    const SEG_C: &str = "abcdefghijklmnopqrstuvwxy_-";

    fn general(a: &str, b: &str, c: &str) -> String {
        format!("{a}.{b}.{c}")
    }

    #[test]
    fn general_accepts_well_formed_token() {
        assert!(TokenGrammar::General.is_match(&general(SEG_A, SEG_B, SEG_C)));
    }

    #[test]
    fn general_requires_leading_m_n_or_o() {
        let a = format!("Q{}", &SEG_A[1..]);
        assert!(!TokenGrammar::General.is_match(&general(&a, SEG_B, SEG_C)));
        for lead in ["M", "N", "O"] {
            let a = format!("{lead}{}", &SEG_A[1..]);
            assert!(TokenGrammar::General.is_match(&general(&a, SEG_B, SEG_C)));
        }
    }

    #[test]
    fn general_rejects_padding_and_standard_alphabet() {
        let padded = format!("{}=", &SEG_A[..23]);
        assert!(!TokenGrammar::General.is_match(&general(&padded, SEG_B, SEG_C)));
        let slash = format!("{}/", &SEG_A[..23]);
        assert!(!TokenGrammar::General.is_match(&general(&slash, SEG_B, SEG_C)));
    }

    #[test]
    fn general_rejects_short_segments() {
        assert!(!TokenGrammar::General.is_match(&general(SEG_A, "YrB9Q", SEG_C)));
        assert!(!TokenGrammar::General.is_match(&general(SEG_A, SEG_B, &SEG_C[1..])));
    }

    #[test]
    fn general_is_unanchored() {
        let embedded = format!("Authorization: {}  trailing", general(SEG_A, SEG_B, SEG_C));
        assert!(TokenGrammar::General.is_match(&embedded));
        // A longer first segment still passes when its last 24 chars conform.
        let longer = general(&format!("xyzw{SEG_A}"), SEG_B, SEG_C);
        assert!(TokenGrammar::General.is_match(&longer));
    }

    #[test]
    fn general_rejects_unicode_word_characters() {
        let a = format!("{}é", &SEG_A[..23]);
        assert!(!TokenGrammar::General.is_match(&general(&a, SEG_B, SEG_C)));
    }

    #[test]
    fn mfa_accepts_prefix_and_84_chars() {
        let token = format!("mfa.{}", "a".repeat(84));
        assert!(TokenGrammar::Mfa.is_match(&token));
        assert!(!TokenGrammar::Mfa.is_match(&format!("mfa.{}", "a".repeat(83))));
        assert!(!TokenGrammar::Mfa.is_match(&format!("mfa:{}", "a".repeat(84))));
    }

    #[test]
    fn mfa_is_unanchored() {
        let token = format!("xx mfa.{}=", "Z".repeat(90));
        assert!(TokenGrammar::Mfa.is_match(&token));
    }
}
