//! Portable key record for import and export.
//!
//! The JSON shape is
//!
//! ```text
//! { "alphabet": "<N letters>",
//!   "reserved": ["000", "999"],
//!   "matrix":   [["822", "699", ...], ...] }
//! ```
//!
//! A record without `alphabet` is read as the 20-letter variant, the layout
//! written by early key files. `reserved` and `matrix` are required.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::code::{Code, ReservedCodes};
use crate::error::PortaError;
use crate::key::CipherKey;

/// Serializable form of a [`CipherKey`].
///
/// Cells and reserved entries are kept as raw strings so that a record can
/// be inspected and validated before it becomes a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Alphabet letters; `None` means the 20-letter variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    /// Reserved codes.
    pub reserved: Vec<String>,
    /// N rows of N 3-digit codes.
    pub matrix: Vec<Vec<String>>,
}

impl KeyRecord {
    /// Captures `key` as a record.
    pub fn from_key(key: &CipherKey) -> Self {
        KeyRecord {
            alphabet: Some(key.alphabet().to_string()),
            reserved: key.reserved().iter().map(String::from).collect(),
            matrix: key
                .rows()
                .map(|row| row.iter().map(|&c| String::from(c)).collect())
                .collect(),
        }
    }

    /// Validates the record and turns it into a key.
    ///
    /// # Errors
    /// Returns [`PortaError::MalformedKey`] if the alphabet is empty or
    /// invalid, the matrix is not N×N for the alphabet's N, a cell or
    /// reserved entry is not a 3-digit code, a code appears in two cells, or
    /// a cell holds a reserved code.
    pub fn into_key(self) -> Result<CipherKey, PortaError> {
        let alphabet = match self.alphabet.as_deref() {
            None => Alphabet::reduced(),
            Some(letters) => Alphabet::new(letters)
                .map_err(|e| PortaError::malformed(format!("alphabet: {}", e)))?,
        };
        let n = alphabet.len();

        // Empty entries are what an empty reserved field splits into.
        let reserved = self
            .reserved
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<Code>()
                    .map_err(|_| PortaError::malformed(format!("reserved entry {:?} is not a 3-digit code", s)))
            })
            .collect::<Result<ReservedCodes, PortaError>>()?;

        if self.matrix.len() != n {
            return Err(PortaError::malformed(format!(
                "matrix has {} rows, expected {}",
                self.matrix.len(),
                n
            )));
        }

        let mut cells = Vec::with_capacity(alphabet.cells());
        let mut seen = HashSet::with_capacity(alphabet.cells());
        for (r, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(PortaError::malformed(format!(
                    "matrix row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    n
                )));
            }
            for (c, cell) in row.iter().enumerate() {
                let code: Code = cell.parse().map_err(|_| {
                    PortaError::malformed(format!("cell ({}, {}) {:?} is not a 3-digit code", r, c, cell))
                })?;
                if reserved.contains(code) {
                    return Err(PortaError::malformed(format!(
                        "cell ({}, {}) holds reserved code {}",
                        r, c, code
                    )));
                }
                if !seen.insert(code) {
                    return Err(PortaError::malformed(format!(
                        "code {} appears in more than one cell",
                        code
                    )));
                }
                cells.push(code);
            }
        }

        debug!(size = n, reserved = reserved.len(), "decoded key record");
        Ok(CipherKey::from_parts(alphabet, reserved, cells))
    }

    /// Renders the record as pretty JSON with two-space indentation.
    pub fn to_json(&self) -> String {
        // A record of plain strings always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parses a record from JSON text.
    ///
    /// # Errors
    /// Returns [`PortaError::MalformedKey`] if the text is not a JSON object
    /// of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, PortaError> {
        serde_json::from_str(json).map_err(|e| PortaError::malformed(format!("invalid key JSON: {}", e)))
    }
}

/// Exports `key` as a portable record.
pub fn serialize(key: &CipherKey) -> KeyRecord {
    KeyRecord::from_key(key)
}

/// Imports a key from a portable record.
///
/// # Errors
/// See [`KeyRecord::into_key`].
pub fn deserialize(record: KeyRecord) -> Result<CipherKey, PortaError> {
    record.into_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_builder::KeyMatrixBuilder;

    fn built(alphabet: Alphabet) -> CipherKey {
        KeyMatrixBuilder::new(alphabet, ReservedCodes::default())
            .build_seeded(Some("record"))
            .unwrap()
    }

    fn tiny_record() -> KeyRecord {
        KeyRecord {
            alphabet: Some("AB".to_string()),
            reserved: vec!["000".to_string()],
            matrix: vec![
                vec!["010".to_string(), "020".to_string()],
                vec!["030".to_string(), "040".to_string()],
            ],
        }
    }

    #[test]
    fn test_export_import_preserves_key() {
        for alphabet in [Alphabet::full(), Alphabet::reduced()] {
            let key = built(alphabet);
            let back = deserialize(serialize(&key)).unwrap();
            assert_eq!(back, key);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let key = built(Alphabet::full());
        let json = serialize(&key).to_json();
        assert!(json.starts_with("{\n  \"alphabet\": \"ABCDEFGHIJKLMNOPQRSTUVWXYZ\""));
        let back = KeyRecord::from_json(&json).unwrap().into_key().unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_missing_alphabet_defaults_to_reduced() {
        let key = built(Alphabet::reduced());
        let mut record = serialize(&key);
        record.alphabet = None;
        let json = record.to_json();
        assert!(!json.contains("alphabet"));
        let back = KeyRecord::from_json(&json).unwrap().into_key().unwrap();
        assert_eq!(back.alphabet(), &Alphabet::reduced());
        assert_eq!(back.cells(), key.cells());
    }

    #[test]
    fn test_missing_matrix_is_malformed() {
        let err = KeyRecord::from_json(r#"{"alphabet":"AB","reserved":[]}"#).unwrap_err();
        assert!(matches!(err, PortaError::MalformedKey { .. }));
    }

    #[test]
    fn test_empty_alphabet_is_malformed() {
        let mut record = tiny_record();
        record.alphabet = Some(String::new());
        assert!(matches!(
            record.into_key(),
            Err(PortaError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut record = tiny_record();
        record.matrix.pop();
        assert_eq!(
            record.into_key(),
            Err(PortaError::malformed("matrix has 1 rows, expected 2"))
        );
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut record = tiny_record();
        record.matrix[1].push("050".to_string());
        assert_eq!(
            record.into_key(),
            Err(PortaError::malformed("matrix row 1 has 3 cells, expected 2"))
        );
    }

    #[test]
    fn test_bad_cell() {
        let mut record = tiny_record();
        record.matrix[0][1] = "20".to_string();
        assert_eq!(
            record.into_key(),
            Err(PortaError::malformed("cell (0, 1) \"20\" is not a 3-digit code"))
        );
    }

    #[test]
    fn test_duplicate_cell() {
        let mut record = tiny_record();
        record.matrix[1][1] = "010".to_string();
        assert_eq!(
            record.into_key(),
            Err(PortaError::malformed("code 010 appears in more than one cell"))
        );
    }

    #[test]
    fn test_reserved_cell() {
        let mut record = tiny_record();
        record.matrix[0][0] = "000".to_string();
        assert!(matches!(
            record.into_key(),
            Err(PortaError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_blank_reserved_entries_are_ignored() {
        let mut record = tiny_record();
        record.reserved = vec![String::new()];
        let key = record.into_key().unwrap();
        assert!(key.reserved().is_empty());
    }
}
