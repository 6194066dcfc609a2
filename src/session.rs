//! Session: an owned handle on the active key and its settings.
//!
//! A session replaces process-wide "current key" state. Each session holds
//! at most one [`CipherKey`] plus the [`CipherConfig`] that drives
//! generation and encode/decode, so independent sessions never interfere and
//! tests can create as many as they need.
//!
//! Operations that fail leave the held key untouched.

use tracing::info;

use crate::codec::{decode, encode_text};
use crate::config::CipherConfig;
use crate::error::PortaError;
use crate::key::CipherKey;
use crate::key_builder::KeyMatrixBuilder;
use crate::random::seeded_sequence::SeededSequence;
use crate::record::KeyRecord;
use crate::simulator::{simulate, Transmission};

/// Key holder for one encode/decode session.
///
/// # Examples
///
/// ```
/// use porta_cipher::{CipherConfig, Session};
///
/// let mut session = Session::new(CipherConfig::default());
/// session.generate(Some("porta")).unwrap();
///
/// let cipher = session.encrypt("Hello").unwrap();
/// assert_eq!(cipher, "639 836 057");
/// assert_eq!(session.decrypt(&cipher).unwrap(), "HELLO");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    key: Option<CipherKey>,
    config: CipherConfig,
}

impl Session {
    /// Creates a session with no key.
    pub fn new(config: CipherConfig) -> Self {
        Session { key: None, config }
    }

    /// Creates a session around an existing key.
    pub fn with_key(key: CipherKey, config: CipherConfig) -> Self {
        Session {
            key: Some(key),
            config,
        }
    }

    /// The active key, if any.
    pub fn key(&self) -> Option<&CipherKey> {
        self.key.as_ref()
    }

    /// The session settings.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Replaces the session settings. The held key is kept.
    pub fn set_config(&mut self, config: CipherConfig) {
        self.config = config;
    }

    /// Builds a new key from `seed`, or from the configured seed when
    /// `seed` is `None`.
    ///
    /// The seed is trimmed; a blank seed produces a time-derived key.
    ///
    /// # Errors
    /// Returns configuration errors from [`CipherConfig::validate`] and
    /// [`PortaError::InsufficientCodes`] from the builder. The previous key
    /// is kept on error.
    pub fn generate(&mut self, seed: Option<&str>) -> Result<&CipherKey, PortaError> {
        let alphabet = self.config.alphabet()?;
        let reserved = self.config.reserved_codes()?;
        let seed = match seed {
            Some(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            None => self.config.seed(),
        };

        let mut sequence = SeededSequence::new(seed);
        let key = KeyMatrixBuilder::new(alphabet, reserved).build(&mut sequence)?;
        info!(
            size = key.size(),
            cells = key.cells().len(),
            seeded = seed.is_some(),
            "generated cipher key"
        );
        Ok(&*self.key.insert(key))
    }

    /// Loads a key from a record.
    ///
    /// # Errors
    /// Returns [`PortaError::MalformedKey`] if the record is inconsistent;
    /// the previous key is kept.
    pub fn import_record(&mut self, record: KeyRecord) -> Result<&CipherKey, PortaError> {
        let key = record.into_key()?;
        info!(size = key.size(), "imported cipher key");
        Ok(&*self.key.insert(key))
    }

    /// Loads a key from record JSON.
    ///
    /// # Errors
    /// As [`import_record`](Self::import_record), plus unparsable JSON.
    pub fn import_json(&mut self, json: &str) -> Result<&CipherKey, PortaError> {
        let record = KeyRecord::from_json(json)?;
        self.import_record(record)
    }

    /// Exports the active key.
    ///
    /// # Errors
    /// Returns [`PortaError::NoKey`] if no key is held.
    pub fn export_record(&self) -> Result<KeyRecord, PortaError> {
        Ok(KeyRecord::from_key(self.require_key()?))
    }

    /// Exports the active key as pretty JSON.
    ///
    /// # Errors
    /// Returns [`PortaError::NoKey`] if no key is held.
    pub fn export_json(&self) -> Result<String, PortaError> {
        Ok(self.export_record()?.to_json())
    }

    /// Normalizes and encodes `text` with the configured policy and
    /// framing; kept characters follow the codes.
    ///
    /// # Errors
    /// Returns [`PortaError::NoKey`] if no key is held.
    pub fn encrypt(&self, text: &str) -> Result<String, PortaError> {
        let key = self.require_key()?;
        Ok(encode_text(text, key, &self.config.policy, self.config.framing))
    }

    /// Decodes `text` with the configured framing and strips one trailing
    /// filler letter.
    ///
    /// # Errors
    /// Returns [`PortaError::NoKey`] if no key is held.
    pub fn decrypt(&self, text: &str) -> Result<String, PortaError> {
        let key = self.require_key()?;
        Ok(decode(
            text,
            key,
            self.config.framing,
            self.config.policy.filler(),
        ))
    }

    /// Runs a sender/receiver walkthrough for `text`.
    ///
    /// # Errors
    /// Returns [`PortaError::NoKey`] if no key is held.
    pub fn simulate(&self, text: &str) -> Result<Transmission, PortaError> {
        let key = self.require_key()?;
        Ok(simulate(text, key, self.config.policy.filler()))
    }

    fn require_key(&self) -> Result<&CipherKey, PortaError> {
        self.key.as_ref().ok_or(PortaError::NoKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Framing;

    #[test]
    fn test_no_key_errors() {
        let session = Session::default();
        assert_eq!(session.encrypt("abc"), Err(PortaError::NoKey));
        assert_eq!(session.decrypt("123"), Err(PortaError::NoKey));
        assert_eq!(session.export_json(), Err(PortaError::NoKey));
        assert!(matches!(session.simulate("abc"), Err(PortaError::NoKey)));
    }

    #[test]
    fn test_generate_uses_configured_seed() {
        let config = CipherConfig {
            seed: Some("porta".to_string()),
            ..CipherConfig::default()
        };
        let mut a = Session::new(config);
        let mut b = Session::new(CipherConfig::default());
        let ka = a.generate(None).unwrap().clone();
        let kb = b.generate(Some(" porta ")).unwrap().clone();
        assert_eq!(ka, kb);
    }

    #[test]
    fn test_failed_generate_keeps_key() {
        let mut session = Session::new(CipherConfig::default());
        let before = session.generate(Some("keep me")).unwrap().clone();

        let reserved: Vec<String> = (0..400).map(|i| format!("{:03}", i)).collect();
        session.set_config(CipherConfig {
            reserved: reserved.join(","),
            ..CipherConfig::default()
        });
        assert_eq!(
            session.generate(Some("other")).unwrap_err(),
            PortaError::InsufficientCodes {
                required: 676,
                available: 600
            }
        );
        assert_eq!(session.key(), Some(&before));
    }

    #[test]
    fn test_encrypt_decrypt_concat() {
        let config = CipherConfig {
            framing: Framing::Concat,
            ..CipherConfig::default()
        };
        let mut session = Session::new(config);
        session.generate(Some("porta")).unwrap();
        let cipher = session.encrypt("hello").unwrap();
        assert_eq!(cipher, "639836057");
        assert_eq!(session.decrypt(&cipher).unwrap(), "HELLO");
    }
}
