//! Core deterministic primitives.
//!
//! Everything in this module is bit-exact across platforms and processes.
//! The RNG pipeline mirrors the browser client's generator so that a seed
//! string alone reproduces the exact board the player saw.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{hash_bytes, BoardHash, CommitmentHasher};
pub use rng::{mix_seed, SeededRng};
