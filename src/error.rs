//! Error types for the porta cipher library.

use thiserror::Error;

/// Errors produced by the porta cipher library.
///
/// Only structural preconditions are errors. Unencodable pairs and unknown
/// codes surface as sentinel text in the output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortaError {
    /// Fewer non-reserved codes remain than the matrix has cells.
    #[error("insufficient codes: required {required}, available {available}")]
    InsufficientCodes {
        /// Number of matrix cells (N²).
        required: usize,
        /// Number of codes left after removing the reserved set.
        available: usize,
    },

    /// An imported key record is structurally inconsistent.
    #[error("malformed key: {reason}")]
    MalformedKey {
        /// Description of the inconsistency.
        reason: String,
    },

    /// Alphabet is empty, holds a non-letter, or repeats a letter.
    #[error("invalid alphabet: {reason}")]
    InvalidAlphabet {
        /// Description of the alphabet problem.
        reason: String,
    },

    /// A value that should be a 3-digit code is not.
    #[error("invalid code: {value:?} is not a 3-digit code")]
    InvalidCode {
        /// The offending input, verbatim.
        value: String,
    },

    /// A session operation ran before any key was generated or imported.
    #[error("no cipher key loaded; generate or import a key first")]
    NoKey,

    /// Configuration cannot be honoured.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration problem.
        reason: String,
    },
}

impl PortaError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        PortaError::MalformedKey {
            reason: reason.into(),
        }
    }
}
