//! Three-digit codes and the reserved-code set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortaError;

/// Number of distinct 3-digit codes, `"000"` through `"999"`.
pub const CODE_SPACE: usize = 1000;

/// A 3-digit code in `000..=999`, always rendered zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(u16);

impl Code {
    /// Wraps a numeric value.
    ///
    /// # Errors
    /// Returns [`PortaError::InvalidCode`] if `value > 999`.
    pub fn new(value: u16) -> Result<Self, PortaError> {
        if value as usize >= CODE_SPACE {
            return Err(PortaError::InvalidCode {
                value: value.to_string(),
            });
        }
        Ok(Code(value))
    }

    /// Numeric value of the code.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Every code in ascending numeric order.
    pub fn all() -> impl Iterator<Item = Code> {
        (0..CODE_SPACE as u16).map(Code)
    }
}

/// Whether `text` is exactly three ASCII digits.
fn is_code_text(text: &str) -> bool {
    text.len() == 3 && text.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Code {
    type Err = PortaError;

    /// Parses exactly three ASCII digits; `"7"` and `"0007"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_code_text(s) {
            return Err(PortaError::InvalidCode {
                value: s.to_string(),
            });
        }
        let value = s.bytes().fold(0u16, |acc, b| acc * 10 + (b - b'0') as u16);
        Ok(Code(value))
    }
}

impl TryFrom<String> for Code {
    type Error = PortaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Codes excluded from matrix assignment.
///
/// Defaults to `{"000", "999"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedCodes {
    codes: BTreeSet<Code>,
}

impl Default for ReservedCodes {
    fn default() -> Self {
        ReservedCodes {
            codes: [Code(0), Code(999)].into_iter().collect(),
        }
    }
}

impl ReservedCodes {
    /// An empty reserved set.
    pub fn none() -> Self {
        ReservedCodes {
            codes: BTreeSet::new(),
        }
    }

    /// Parses a comma-separated list such as `"000, 999"`.
    ///
    /// Entries are trimmed and empty entries are skipped, so `""` yields an
    /// empty set.
    ///
    /// # Errors
    /// Returns [`PortaError::InvalidCode`] for an entry that is not exactly
    /// three digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use porta_cipher::ReservedCodes;
    ///
    /// let reserved = ReservedCodes::parse(" 000 , 999,123 ").unwrap();
    /// assert_eq!(reserved.len(), 3);
    /// assert!(ReservedCodes::parse("12").is_err());
    /// ```
    pub fn parse(list: &str) -> Result<Self, PortaError> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse::<Code>)
            .collect()
    }

    /// Number of reserved codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether `code` is reserved.
    pub fn contains(&self, code: Code) -> bool {
        self.codes.contains(&code)
    }

    /// Number of codes left for assignment, `1000 - |reserved|`.
    pub fn available(&self) -> usize {
        CODE_SPACE - self.codes.len()
    }

    /// Reserved codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Code> + '_ {
        self.codes.iter().copied()
    }
}

impl FromIterator<Code> for ReservedCodes {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        ReservedCodes {
            codes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ReservedCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.codes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_parse_and_display() {
        let code: Code = "007".parse().unwrap();
        assert_eq!(code.value(), 7);
        assert_eq!(code.to_string(), "007");
        assert_eq!("999".parse::<Code>().unwrap().value(), 999);
    }

    #[test]
    fn test_code_parse_rejects_wrong_width() {
        for bad in ["", "7", "07", "0007", "12a", " 12", "１２３"] {
            assert_eq!(
                bad.parse::<Code>(),
                Err(PortaError::InvalidCode {
                    value: bad.to_string()
                }),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_code_new_bounds() {
        assert!(Code::new(999).is_ok());
        assert!(Code::new(1000).is_err());
    }

    #[test]
    fn test_all_codes_ascending() {
        let all: Vec<Code> = Code::all().collect();
        assert_eq!(all.len(), CODE_SPACE);
        assert_eq!(all[0].to_string(), "000");
        assert_eq!(all[999].to_string(), "999");
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_code_serde_as_string() {
        let code: Code = "042".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"042\"");
        let back: Code = serde_json::from_str("\"042\"").unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<Code>("\"42\"").is_err());
        assert!(serde_json::from_str::<Code>("42").is_err());
    }

    #[test]
    fn test_reserved_default() {
        let reserved = ReservedCodes::default();
        assert_eq!(reserved.len(), 2);
        assert!(reserved.contains(Code(0)));
        assert!(reserved.contains(Code(999)));
        assert_eq!(reserved.available(), 998);
        assert_eq!(reserved.to_string(), "000,999");
    }

    #[test]
    fn test_reserved_parse_trims_and_dedups() {
        let reserved = ReservedCodes::parse(" 123 ,000,123,, ").unwrap();
        assert_eq!(reserved.len(), 2);
        assert_eq!(reserved.to_string(), "000,123");
    }

    #[test]
    fn test_reserved_parse_empty_list() {
        assert!(ReservedCodes::parse("").unwrap().is_empty());
        assert!(ReservedCodes::parse(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_reserved_parse_invalid_entry() {
        assert_eq!(
            ReservedCodes::parse("000,99x"),
            Err(PortaError::InvalidCode {
                value: "99x".to_string()
            })
        );
    }
}
