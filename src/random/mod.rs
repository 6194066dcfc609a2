//! Deterministic randomness for key generation.
//!
//! Provides the seeded linear congruential sequence that drives the
//! code-pool shuffle, and the trait the key builder consumes it through.

pub mod seeded_sequence;
pub mod sequence;
