//! CipherKey: the immutable alphabet + reserved set + code matrix bundle.

use crate::alphabet::Alphabet;
use crate::code::{Code, ReservedCodes};

/// Immutable N×N bijection between letter pairs and 3-digit codes.
///
/// Built once by [`KeyMatrixBuilder`](crate::key_builder::KeyMatrixBuilder)
/// or loaded from a [`KeyRecord`](crate::record::KeyRecord); never mutated
/// afterwards, so a key may be shared freely between encode and decode
/// calls.
///
/// # Invariants
///
/// - `matrix.len() == alphabet.len()²`, stored row-major.
/// - Every cell holds a distinct code.
/// - No cell holds a reserved code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherKey {
    alphabet: Alphabet,
    reserved: ReservedCodes,
    matrix: Vec<Code>,
}

impl CipherKey {
    /// Assembles a key from already validated parts.
    pub(crate) fn from_parts(alphabet: Alphabet, reserved: ReservedCodes, matrix: Vec<Code>) -> Self {
        debug_assert_eq!(matrix.len(), alphabet.cells());
        CipherKey {
            alphabet,
            reserved,
            matrix,
        }
    }

    /// The alphabet indexing rows and columns.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Codes that were excluded from assignment.
    pub fn reserved(&self) -> &ReservedCodes {
        &self.reserved
    }

    /// Matrix dimension N.
    pub fn size(&self) -> usize {
        self.alphabet.len()
    }

    /// Code at `(row, col)`, if both are in range.
    pub fn code_at(&self, row: usize, col: usize) -> Option<Code> {
        let n = self.size();
        if row >= n || col >= n {
            return None;
        }
        Some(self.matrix[row * n + col])
    }

    /// Code for the ordered letter pair `(first, second)`.
    ///
    /// Returns `None` when either letter is outside the alphabet.
    pub fn code_for_pair(&self, first: char, second: char) -> Option<Code> {
        let row = self.alphabet.index_of(first)?;
        let col = self.alphabet.index_of(second)?;
        self.code_at(row, col)
    }

    /// Finds the cell holding `code`, scanning row-major; first match wins.
    pub fn locate(&self, code: Code) -> Option<(usize, usize)> {
        let n = self.size();
        self.matrix
            .iter()
            .position(|&c| c == code)
            .map(|i| (i / n, i % n))
    }

    /// Letter pair whose cell holds `code`.
    pub fn pair_for(&self, code: Code) -> Option<(char, char)> {
        let (row, col) = self.locate(code)?;
        Some((self.alphabet.letter(row)?, self.alphabet.letter(col)?))
    }

    /// Matrix rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Code]> + '_ {
        self.matrix.chunks(self.size())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Code] {
        &self.matrix
    }
}
