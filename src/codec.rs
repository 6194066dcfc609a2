//! Codec: letter pairs to 3-digit codes and back.
//!
//! Encoding walks the letter stream two at a time and emits the matrix cell
//! for each pair, or [`ENCODE_SENTINEL`] when a letter is outside the
//! alphabet. Decoding tokenizes a code stream under one of two framings and
//! emits the letter pair for each code, or [`DECODE_SENTINEL`] for a code
//! the matrix does not hold. Neither direction fails; sentinels mark the
//! units that could not be converted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::code::Code;
use crate::key::CipherKey;
use crate::normalizer::{normalize, NormalizePolicy};

/// Emitted for a pair that has no cell in the matrix.
pub const ENCODE_SENTINEL: &str = "???";

/// Emitted for a well-formed code that no cell holds.
pub const DECODE_SENTINEL: &str = "??";

/// How codes are delimited in cipher text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// Codes separated by a single space: `"639 836 057"`.
    #[default]
    Space,
    /// Codes back to back, 3 digits each: `"639836057"`.
    Concat,
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::Space => write!(f, "space"),
            Framing::Concat => write!(f, "concat"),
        }
    }
}

impl FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(Framing::Space),
            "concat" => Ok(Framing::Concat),
            other => Err(format!("unknown framing {:?}, expected space or concat", other)),
        }
    }
}

/// Encodes an already normalized letter stream.
///
/// Letters are taken in consecutive pairs. A pair with a letter outside the
/// key's alphabet, or a lone trailing letter, becomes [`ENCODE_SENTINEL`].
///
/// # Examples
///
/// ```
/// use porta_cipher::{encode, Alphabet, Framing, KeyMatrixBuilder, ReservedCodes};
///
/// let key = KeyMatrixBuilder::new(Alphabet::full(), ReservedCodes::default())
///     .build_seeded(Some("porta"))
///     .unwrap();
/// assert_eq!(encode("HELLOX", &key, Framing::Space), "639 836 057");
/// assert_eq!(encode("HELLOX", &key, Framing::Concat), "639836057");
/// ```
pub fn encode(letters: &str, key: &CipherKey, framing: Framing) -> String {
    let chars: Vec<char> = letters.chars().collect();
    let mut sentinels = 0usize;
    let codes: Vec<String> = chars
        .chunks(2)
        .map(|pair| match pair {
            [a, b] => key.code_for_pair(*a, *b),
            _ => None,
        })
        .map(|code| match code {
            Some(code) => code.to_string(),
            None => {
                sentinels += 1;
                ENCODE_SENTINEL.to_string()
            }
        })
        .collect();

    if sentinels > 0 {
        debug!(sentinels, pairs = codes.len(), "encode emitted sentinel codes");
    }
    match framing {
        Framing::Space => codes.join(" "),
        Framing::Concat => codes.concat(),
    }
}

/// Normalizes `raw`, encodes it, and appends the passthrough characters.
///
/// Passthrough characters are not interleaved with the codes they sat
/// between; they all follow the last code.
pub fn encode_text(raw: &str, key: &CipherKey, policy: &NormalizePolicy, framing: Framing) -> String {
    let normalized = normalize(raw, key.alphabet(), policy);
    let mut out = encode(&normalized.letters, key, framing);
    out.push_str(&normalized.passthrough);
    out
}

/// Decodes a code stream without removing filler.
///
/// - [`Framing::Space`]: the text is split on `' '`; empty tokens are
///   skipped, 3-digit tokens are decoded and any other token is copied
///   verbatim.
/// - [`Framing::Concat`]: scanning left to right, three consecutive digits
///   are decoded as one code; any other character is copied and the scan
///   moves on by one. A tail shorter than three characters that starts with
///   a digit is copied verbatim.
pub fn decode_raw(text: &str, key: &CipherKey, framing: Framing) -> String {
    let mut out = String::with_capacity(text.len());
    let mut sentinels = 0usize;
    let mut emit = |code: Code, out: &mut String| match key.pair_for(code) {
        Some((a, b)) => {
            out.push(a);
            out.push(b);
        }
        None => {
            sentinels += 1;
            out.push_str(DECODE_SENTINEL);
        }
    };

    match framing {
        Framing::Space => {
            for token in text.split(' ').filter(|t| !t.is_empty()) {
                match token.parse::<Code>() {
                    Ok(code) => emit(code, &mut out),
                    Err(_) => out.push_str(token),
                }
            }
        }
        Framing::Concat => {
            let chars: Vec<char> = text.chars().collect();
            let mut i = 0;
            while i < chars.len() {
                if !chars[i].is_ascii_digit() {
                    out.push(chars[i]);
                    i += 1;
                    continue;
                }
                if i + 2 >= chars.len() {
                    out.extend(&chars[i..]);
                    break;
                }
                match code_from_digits(&chars[i..i + 3]) {
                    Some(code) => {
                        emit(code, &mut out);
                        i += 3;
                    }
                    None => {
                        out.push(chars[i]);
                        i += 1;
                    }
                }
            }
        }
    }

    if sentinels > 0 {
        debug!(sentinels, "decode emitted sentinel pairs");
    }
    out
}

/// Removes one trailing `filler`, if present.
///
/// Best effort only: plaintext that genuinely ended in the filler letter
/// loses that letter too.
pub fn strip_filler(decoded: &str, filler: char) -> &str {
    decoded.strip_suffix(filler).unwrap_or(decoded)
}

/// Decodes a code stream and strips one trailing filler letter.
///
/// # Examples
///
/// ```
/// use porta_cipher::{decode, Alphabet, Framing, KeyMatrixBuilder, ReservedCodes};
///
/// let key = KeyMatrixBuilder::new(Alphabet::full(), ReservedCodes::default())
///     .build_seeded(Some("porta"))
///     .unwrap();
/// assert_eq!(decode("639 836 057", &key, Framing::Space, 'X'), "HELLO");
/// assert_eq!(decode("639836057", &key, Framing::Concat, 'X'), "HELLO");
/// ```
pub fn decode(text: &str, key: &CipherKey, framing: Framing, filler: char) -> String {
    let decoded = decode_raw(text, key, framing);
    strip_filler(&decoded, filler.to_ascii_uppercase()).to_string()
}

/// Reads three ASCII digit characters as a code.
fn code_from_digits(digits: &[char]) -> Option<Code> {
    let mut value = 0u16;
    for &d in digits {
        value = value * 10 + d.to_digit(10)? as u16;
    }
    Code::new(value).ok()
}
