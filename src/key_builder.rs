//! KeyMatrixBuilder: seeded construction of the code matrix.
//!
//! The candidate pool is every code `"000"`..`"999"` in ascending order with
//! the reserved set removed. A descending Fisher-Yates pass driven by
//! [`Sequence::next_int`] shuffles the pool, and the first N² codes are laid
//! into the matrix row by row.
//!
//! The traversal order and the `next_int(0, i + 1)` range are fixed: any
//! other choice still yields a valid bijection, but not the one other peers
//! derive from the same seed.

use tracing::{debug, warn};

use crate::alphabet::Alphabet;
use crate::code::{Code, ReservedCodes};
use crate::error::PortaError;
use crate::key::CipherKey;
use crate::random::seeded_sequence::SeededSequence;
use crate::random::sequence::Sequence;

/// Builds [`CipherKey`]s for a fixed alphabet and reserved set.
///
/// # Examples
///
/// ```
/// use porta_cipher::{Alphabet, KeyMatrixBuilder, ReservedCodes};
///
/// let builder = KeyMatrixBuilder::new(Alphabet::full(), ReservedCodes::default());
/// let a = builder.build_seeded(Some("porta")).unwrap();
/// let b = builder.build_seeded(Some("porta")).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.cells().len(), 676);
/// ```
#[derive(Debug, Clone)]
pub struct KeyMatrixBuilder {
    alphabet: Alphabet,
    reserved: ReservedCodes,
}

impl KeyMatrixBuilder {
    /// Creates a builder for `alphabet` that never assigns a code in
    /// `reserved`.
    pub fn new(alphabet: Alphabet, reserved: ReservedCodes) -> Self {
        KeyMatrixBuilder { alphabet, reserved }
    }

    /// Builds a key by drawing from `sequence`.
    ///
    /// The whole shuffle runs inside this call; `sequence` is left advanced
    /// by exactly `pool_len - 1` draws on success.
    ///
    /// # Errors
    /// Returns [`PortaError::InsufficientCodes`] if fewer than N² codes
    /// remain after removing the reserved set. No draws are made in that
    /// case.
    pub fn build(&self, sequence: &mut dyn Sequence) -> Result<CipherKey, PortaError> {
        let required = self.alphabet.cells();
        let available = self.reserved.available();
        if available < required {
            warn!(required, available, "not enough unreserved codes for matrix");
            return Err(PortaError::InsufficientCodes {
                required,
                available,
            });
        }

        let mut pool: Vec<Code> = Code::all()
            .filter(|&code| !self.reserved.contains(code))
            .collect();
        Self::shuffle(&mut pool, sequence);
        pool.truncate(required);

        debug!(
            size = self.alphabet.len(),
            pool = available,
            reserved = self.reserved.len(),
            "built key matrix"
        );
        Ok(CipherKey::from_parts(
            self.alphabet.clone(),
            self.reserved.clone(),
            pool,
        ))
    }

    /// Builds a key from a seed string; see [`SeededSequence::new`] for the
    /// time-based fallback when `seed` is absent or empty.
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn build_seeded(&self, seed: Option<&str>) -> Result<CipherKey, PortaError> {
        let mut sequence = SeededSequence::new(seed);
        self.build(&mut sequence)
    }

    /// In-place descending Fisher-Yates shuffle.
    fn shuffle(pool: &mut [Code], sequence: &mut dyn Sequence) {
        for i in (1..pool.len()).rev() {
            let j = sequence.next_int(0, i as i64 + 1) as usize;
            pool.swap(i, j);
        }
    }
}
