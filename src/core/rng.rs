//! Deterministic Random Number Generator
//!
//! Two-stage derivation from an opaque seed string: an xmur3 rolling hash
//! mixes the string into a 32-bit state, which then drives a Mulberry32
//! generator. Both stages are bit-exact ports of the browser client's
//! generator, so server and client derive identical boards from the same
//! seed.

use serde::{Deserialize, Serialize};

/// Mix a seed string into a 32-bit integer using the xmur3 rolling hash.
///
/// Order-dependent multiply-xor-rotate over each UTF-16 code unit of the
/// input, followed by a single finalization round. UTF-16 units (rather
/// than bytes or chars) keep the result identical to JavaScript's
/// `charCodeAt` iteration for any seed the client can produce.
///
/// # Example
///
/// ```
/// use minefield::core::rng::mix_seed;
///
/// assert_eq!(mix_seed("S1"), 4276854563); // Always the same!
/// ```
pub fn mix_seed(seed: &str) -> u32 {
    let units: Vec<u16> = seed.encode_utf16().collect();
    let mut h: u32 = 1779033703 ^ units.len() as u32;
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3432918353);
        h = h.rotate_left(13);
    }
    // Finalization round (the JS original draws once from the closure)
    h = (h ^ (h >> 16)).wrapping_mul(2246822507);
    h = (h ^ (h >> 13)).wrapping_mul(3266489909);
    h ^ (h >> 16)
}

/// Deterministic PRNG using the Mulberry32 algorithm.
///
/// # Determinism Guarantee
///
/// Given the same 32-bit state, this RNG produces the exact same sequence
/// on any platform, and the same sequence as the reference JavaScript
/// implementation. The mine layouts of live boards depend on it; the
/// constants below must never change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a new RNG from a 32-bit state.
    pub fn new(state: u32) -> Self {
        Self { state }
    }

    /// Create an RNG from a seed string via [`mix_seed`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(mix_seed(seed))
    }

    /// Generate the next 32-bit random value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Generate a random float in `[0, 1)`.
    ///
    /// Maps a u32 draw by dividing by 2^32, exactly like the reference
    /// implementation. Every float is therefore representable in an f64
    /// without rounding.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4294967296.0
    }

    /// Generate a random index in `[0, n)` as `floor(unit * n)`.
    ///
    /// Returns 0 when `n == 0`.
    #[inline]
    pub fn next_index(&mut self, n: usize) -> usize {
        (self.next_unit() * n as f64) as usize
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_seed_known_values() {
        // These values must never change! Live boards derive from them.
        assert_eq!(mix_seed("S1"), 4276854563);
        assert_eq!(mix_seed("S2"), 2349960975);
        assert_eq!(mix_seed(""), 167010153);
    }

    #[test]
    fn test_mix_seed_order_dependent() {
        assert_ne!(mix_seed("ab"), mix_seed("ba"));
    }

    #[test]
    fn test_rng_known_values() {
        // Regression vectors from the reference implementation.
        let mut rng = SeededRng::from_seed_str("S1");
        assert_eq!(rng.next_u32(), 1818650337);
        assert_eq!(rng.next_u32(), 2632871475);
        assert_eq!(rng.next_u32(), 1465939539);
        assert_eq!(rng.next_u32(), 2728596554);
        assert_eq!(rng.next_u32(), 2839420266);

        let mut rng = SeededRng::new(12345);
        assert_eq!(rng.next_u32(), 4207900869);
        assert_eq!(rng.next_u32(), 1317490944);
        assert_eq!(rng.next_u32(), 2079646450);
        assert_eq!(rng.next_u32(), 3513001552);
        assert_eq!(rng.next_u32(), 2187978186);
    }

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = SeededRng::from_seed_str("deterministic");
        let mut rng2 = SeededRng::from_seed_str("deterministic");

        for _ in 0..1000 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SeededRng::from_seed_str("S1");
        let mut rng2 = SeededRng::from_seed_str("S2");

        // Very unlikely to match
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_unit_range() {
        let mut rng = SeededRng::new(9999);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_index() {
        let mut rng = SeededRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_index(100) < 100);
        }

        // Edge case: n = 0
        assert_eq!(rng.next_index(0), 0);

        // Edge case: n = 1
        assert_eq!(rng.next_index(1), 0);
    }
}
