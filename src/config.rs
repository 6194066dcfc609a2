//! Cipher configuration.
//!
//! Collects the settings a caller would otherwise pass to every call: the
//! matrix size, seed, reserved list, normalization policy and framing. All
//! fields are optional in JSON and fall back to their defaults.
//!
//! # Example
//!
//! ```
//! use porta_cipher::{CipherConfig, Framing};
//!
//! let config = CipherConfig::from_json(r#"{ "matrix_size": 20, "framing": "concat" }"#).unwrap();
//! assert_eq!(config.alphabet().unwrap().len(), 20);
//! assert_eq!(config.framing, Framing::Concat);
//! assert_eq!(config.reserved, "000,999");
//! ```

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::code::ReservedCodes;
use crate::codec::Framing;
use crate::error::PortaError;
use crate::normalizer::NormalizePolicy;

/// Default matrix dimension.
pub const DEFAULT_MATRIX_SIZE: usize = 26;

/// Default reserved list.
pub const DEFAULT_RESERVED: &str = "000,999";

/// Settings for key generation and encode/decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// 20 or 26.
    pub matrix_size: usize,
    /// Shared seed; `None` or blank means a time-derived key.
    pub seed: Option<String>,
    /// Comma-separated reserved codes.
    pub reserved: String,
    /// Normalization applied before encoding; its filler is also stripped
    /// after decoding.
    pub policy: NormalizePolicy,
    /// Code delimiting for both directions.
    pub framing: Framing,
}

impl Default for CipherConfig {
    fn default() -> Self {
        CipherConfig {
            matrix_size: DEFAULT_MATRIX_SIZE,
            seed: None,
            reserved: DEFAULT_RESERVED.to_string(),
            policy: NormalizePolicy::default(),
            framing: Framing::default(),
        }
    }
}

impl CipherConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`PortaError::InvalidConfig`] if the text is not valid JSON of
    /// the expected shape, or the settings fail [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, PortaError> {
        let config: CipherConfig = serde_json::from_str(json).map_err(|e| PortaError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the matrix size and reserved list.
    ///
    /// # Errors
    /// Returns [`PortaError::InvalidConfig`] for a matrix size other than 20
    /// or 26, or [`PortaError::InvalidCode`] for a bad reserved entry.
    pub fn validate(&self) -> Result<(), PortaError> {
        self.alphabet()?;
        self.reserved_codes()?;
        Ok(())
    }

    /// The fixed alphabet for `matrix_size`.
    pub fn alphabet(&self) -> Result<Alphabet, PortaError> {
        Alphabet::for_size(self.matrix_size).ok_or_else(|| PortaError::InvalidConfig {
            reason: format!("matrix size must be 20 or 26, got {}", self.matrix_size),
        })
    }

    /// The parsed reserved list.
    pub fn reserved_codes(&self) -> Result<ReservedCodes, PortaError> {
        ReservedCodes::parse(&self.reserved)
    }

    /// The trimmed seed, or `None` when absent or blank.
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
