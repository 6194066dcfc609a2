//! End-to-end transmission walkthrough.
//!
//! Plays both ends of a link that share one key: the sender prepares and
//! encrypts a message, the wire carries the concatenated codes, and the
//! receiver splits the wire into 3-character chunks and decrypts them. Every
//! step is recorded so a front end can show how each pair and code was
//! converted, and whether the message survived.

use crate::code::Code;
use crate::codec::{strip_filler, DECODE_SENTINEL};
use crate::key::CipherKey;
use crate::normalizer::{normalize, NormalizePolicy};

/// Sender side conversion of one letter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairStep {
    /// The two letters.
    pub pair: String,
    /// The matrix code, or `None` if a letter is outside the alphabet.
    pub code: Option<Code>,
}

/// Receiver side conversion of one 3-character chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStep {
    /// The chunk as received.
    pub code: String,
    /// The decoded letter pair, or `None` if no cell holds the chunk.
    pub pair: Option<String>,
}

/// Record of one simulated transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Message as typed.
    pub original: String,
    /// Letters the sender encrypts, padded to even length.
    pub prepared: String,
    /// Whether the sender appended a filler letter.
    pub padded: bool,
    /// Sender conversions, one per pair of `prepared`.
    pub sent: Vec<PairStep>,
    /// Concatenated codes as transmitted. Unconvertible pairs are absent.
    pub wire: String,
    /// Receiver conversions, one per complete chunk of `wire`.
    pub received: Vec<CodeStep>,
    /// Receiver output before filler removal.
    pub decoded: String,
    /// Receiver output after removing one trailing filler.
    pub delivered: String,
    /// What the receiver should end up with.
    pub expected: String,
}

impl Transmission {
    /// Whether the receiver recovered exactly the expected letters.
    pub fn succeeded(&self) -> bool {
        self.expected == self.delivered
    }
}

/// Simulates sending `plain` over a link keyed by `key`.
///
/// The sender drops everything except encodable letters, whatever the
/// caller's normalization policy, and pads with `filler`.
///
/// # Examples
///
/// ```
/// use porta_cipher::{simulate, Alphabet, KeyMatrixBuilder, ReservedCodes};
///
/// let key = KeyMatrixBuilder::new(Alphabet::full(), ReservedCodes::default())
///     .build_seeded(Some("porta"))
///     .unwrap();
/// let run = simulate("Hello!", &key, 'X');
/// assert_eq!(run.wire, "639836057");
/// assert_eq!(run.delivered, "HELLO");
/// assert!(run.succeeded());
/// ```
pub fn simulate(plain: &str, key: &CipherKey, filler: char) -> Transmission {
    let policy = NormalizePolicy::default().with_filler(filler);
    let prepared = normalize(plain, key.alphabet(), &policy);

    let letters: Vec<char> = prepared.letters.chars().collect();
    let sent: Vec<PairStep> = letters
        .chunks(2)
        .map(|pair| PairStep {
            pair: pair.iter().collect(),
            code: match pair {
                [a, b] => key.code_for_pair(*a, *b),
                _ => None,
            },
        })
        .collect();

    let wire: String = sent
        .iter()
        .filter_map(|step| step.code)
        .map(|code| code.to_string())
        .collect();

    let wire_chars: Vec<char> = wire.chars().collect();
    let received: Vec<CodeStep> = wire_chars
        .chunks_exact(3)
        .map(|chunk| {
            let code: String = chunk.iter().collect();
            let pair = code
                .parse::<Code>()
                .ok()
                .and_then(|c| key.pair_for(c))
                .map(|(a, b)| [a, b].iter().collect());
            CodeStep { code, pair }
        })
        .collect();

    let decoded: String = received
        .iter()
        .map(|step| step.pair.as_deref().unwrap_or(DECODE_SENTINEL))
        .collect();
    let delivered = strip_filler(&decoded, policy.filler()).to_string();

    let mut expected = prepared.letters.clone();
    if prepared.padded {
        expected.pop();
    }

    Transmission {
        original: plain.to_string(),
        prepared: prepared.letters,
        padded: prepared.padded,
        sent,
        wire,
        received,
        decoded,
        delivered,
        expected,
    }
}
