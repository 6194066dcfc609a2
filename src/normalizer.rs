//! Text normalization ahead of encoding.
//!
//! Input is upper-cased, then each character is classified in a fixed
//! order, first match wins:
//!
//! 1. ASCII digit → `policy.digits`
//! 2. anything that is not `A`–`Z` → `policy.non_letters`
//! 3. a letter the active alphabet leaves out → `policy.excluded`
//! 4. otherwise an encodable letter
//!
//! `Drop` discards the character; `Keep` moves it to the passthrough
//! buffer, which callers append after the code stream. An odd number of
//! encodable letters is padded with the filler letter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;

/// Default filler letter used to pad odd-length input.
pub const DEFAULT_FILLER: char = 'X';

/// What to do with a character class that is not encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharHandling {
    /// Discard the character.
    #[default]
    Drop,
    /// Carry the character through to the end of the output verbatim.
    Keep,
}

impl FromStr for CharHandling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(CharHandling::Drop),
            "keep" => Ok(CharHandling::Keep),
            other => Err(format!("unknown handling {:?}, expected keep or drop", other)),
        }
    }
}

/// Normalization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizePolicy {
    /// ASCII digits `0`–`9`.
    pub digits: CharHandling,
    /// Everything that is neither a digit nor `A`–`Z` after upper-casing.
    pub non_letters: CharHandling,
    /// `A`–`Z` letters the active alphabet does not contain.
    pub excluded: CharHandling,
    /// Padding letter for odd-length input.
    pub filler: char,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        NormalizePolicy {
            digits: CharHandling::Drop,
            non_letters: CharHandling::Drop,
            excluded: CharHandling::Drop,
            filler: DEFAULT_FILLER,
        }
    }
}

impl NormalizePolicy {
    /// Returns the policy with `filler` upper-cased.
    pub fn with_filler(mut self, filler: char) -> Self {
        self.filler = filler.to_ascii_uppercase();
        self
    }

    /// The filler letter, upper-cased.
    pub fn filler(&self) -> char {
        self.filler.to_ascii_uppercase()
    }
}

/// Result of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    /// Letters to encode, always of even length.
    pub letters: String,
    /// Kept characters, in input order.
    pub passthrough: String,
    /// Whether a filler letter was appended.
    pub padded: bool,
}

/// Applies `policy` to `raw` for encoding under `alphabet`.
///
/// # Examples
///
/// ```
/// use porta_cipher::{normalize, Alphabet, NormalizePolicy};
///
/// let out = normalize("Jack", &Alphabet::reduced(), &NormalizePolicy::default());
/// assert_eq!(out.letters, "AC");
///
/// let out = normalize("hello", &Alphabet::full(), &NormalizePolicy::default());
/// assert_eq!(out.letters, "HELLOX");
/// assert!(out.padded);
/// ```
pub fn normalize(raw: &str, alphabet: &Alphabet, policy: &NormalizePolicy) -> Normalized {
    let mut out = Normalized::default();

    for ch in raw.to_uppercase().chars() {
        let handling = if ch.is_ascii_digit() {
            policy.digits
        } else if !ch.is_ascii_uppercase() {
            policy.non_letters
        } else if alphabet.excludes(ch) {
            policy.excluded
        } else {
            out.letters.push(ch);
            continue;
        };
        if handling == CharHandling::Keep {
            out.passthrough.push(ch);
        }
    }

    if out.letters.chars().count() % 2 == 1 {
        out.letters.push(policy.filler());
        out.padded = true;
    }
    out
}
