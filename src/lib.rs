//! Porta: a seeded bigram substitution cipher.
//!
//! An N×N matrix (N = 20 or 26) assigns every ordered letter pair a unique
//! 3-digit code. The matrix is derived from a seed, so two parties that
//! share the seed, or an exported key file, hold the same key without
//! transmitting it.
//!
//! This is a classical, reversible substitution for teaching and
//! demonstration. It offers no cryptographic security.
//!
//! # Architecture
//!
//! ```text
//! seed ──> SeededSequence ──> KeyMatrixBuilder ──> CipherKey <──> KeyRecord (JSON)
//!                                                      │
//!              raw text ──> normalize ──> encode ──────┤
//!                                                      │
//!                             code text ──> decode ────┘
//! ```
//!
//! [`Session`] bundles one key with a [`CipherConfig`] for callers that want
//! a single handle.
//!
//! # Examples
//!
//! Build a key from a shared seed and round-trip a message:
//!
//! ```
//! use porta_cipher::{decode, encode_text, Alphabet, Framing, KeyMatrixBuilder, NormalizePolicy, ReservedCodes};
//!
//! let key = KeyMatrixBuilder::new(Alphabet::full(), ReservedCodes::default())
//!     .build_seeded(Some("porta"))
//!     .unwrap();
//!
//! let cipher = encode_text("Hello", &key, &NormalizePolicy::default(), Framing::Space);
//! assert_eq!(cipher, "639 836 057");
//! assert_eq!(decode(&cipher, &key, Framing::Space, 'X'), "HELLO");
//! ```
//!
//! Export and re-import the key:
//!
//! ```
//! use porta_cipher::{Alphabet, KeyMatrixBuilder, KeyRecord, ReservedCodes};
//!
//! let key = KeyMatrixBuilder::new(Alphabet::reduced(), ReservedCodes::default())
//!     .build_seeded(Some("porta"))
//!     .unwrap();
//! let json = KeyRecord::from_key(&key).to_json();
//! let loaded = KeyRecord::from_json(&json).unwrap().into_key().unwrap();
//! assert_eq!(loaded, key);
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod code;
pub mod codec;
pub mod config;
pub mod error;
pub mod key;
pub mod key_builder;
pub mod normalizer;
pub mod random;
pub mod record;
pub mod session;
pub mod simulator;

pub use alphabet::Alphabet;
pub use code::{Code, ReservedCodes};
pub use codec::{decode, decode_raw, encode, encode_text, strip_filler, Framing};
pub use config::CipherConfig;
pub use error::PortaError;
pub use key::CipherKey;
pub use key_builder::KeyMatrixBuilder;
pub use normalizer::{normalize, CharHandling, NormalizePolicy, Normalized};
pub use record::KeyRecord;
pub use session::Session;
pub use simulator::{simulate, Transmission};
