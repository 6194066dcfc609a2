//! Ordered letter sets that index the key matrix.

use std::fmt;

use crate::error::PortaError;

/// Letters of the 20-letter variant: A–Z without J, K, U, W, X and Z.
pub const REDUCED_LETTERS: &str = "ABCDEFGHILMNOPQRSTVY";

/// Letters of the full 26-letter variant.
pub const FULL_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered, duplicate-free sequence of uppercase ASCII letters.
///
/// A letter's position is its row and column index in the key matrix, so an
/// alphabet of length N yields an N×N matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Validates and wraps a custom alphabet.
    ///
    /// # Errors
    /// Returns [`PortaError::InvalidAlphabet`] if `letters` is empty,
    /// contains anything other than `A`–`Z`, or repeats a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use porta_cipher::Alphabet;
    ///
    /// assert_eq!(Alphabet::new("ABC").unwrap().len(), 3);
    /// assert!(Alphabet::new("ABA").is_err());
    /// assert!(Alphabet::new("").is_err());
    /// ```
    pub fn new(letters: &str) -> Result<Self, PortaError> {
        if letters.is_empty() {
            return Err(PortaError::InvalidAlphabet {
                reason: "alphabet is empty".to_string(),
            });
        }
        let mut seen = [false; 26];
        let mut out = Vec::with_capacity(letters.len());
        for ch in letters.chars() {
            if !ch.is_ascii_uppercase() {
                return Err(PortaError::InvalidAlphabet {
                    reason: format!("{:?} is not an uppercase letter A-Z", ch),
                });
            }
            let slot = (ch as u8 - b'A') as usize;
            if seen[slot] {
                return Err(PortaError::InvalidAlphabet {
                    reason: format!("letter {:?} appears more than once", ch),
                });
            }
            seen[slot] = true;
            out.push(ch);
        }
        Ok(Alphabet { letters: out })
    }

    /// The 20-letter variant, [`REDUCED_LETTERS`].
    pub fn reduced() -> Self {
        Alphabet {
            letters: REDUCED_LETTERS.chars().collect(),
        }
    }

    /// The full 26-letter variant, [`FULL_LETTERS`].
    pub fn full() -> Self {
        Alphabet {
            letters: FULL_LETTERS.chars().collect(),
        }
    }

    /// Returns the fixed variant for a matrix size of 20 or 26.
    pub fn for_size(size: usize) -> Option<Self> {
        match size {
            20 => Some(Self::reduced()),
            26 => Some(Self::full()),
            _ => None,
        }
    }

    /// Number of letters (the matrix dimension N).
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false for a validated alphabet; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Number of matrix cells, N².
    pub fn cells(&self) -> usize {
        self.letters.len() * self.letters.len()
    }

    /// Row/column index of `ch`, if it belongs to the alphabet.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.letters.iter().position(|&c| c == ch)
    }

    /// Letter at `index`.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Whether `ch` belongs to the alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }

    /// Whether `ch` is an A–Z letter that this alphabet leaves out.
    ///
    /// For the reduced variant these are J, K, U, W, X and Z; the full
    /// alphabet excludes nothing.
    pub fn excludes(&self, ch: char) -> bool {
        ch.is_ascii_uppercase() && !self.contains(ch)
    }

    /// The letters in index order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.letters {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
