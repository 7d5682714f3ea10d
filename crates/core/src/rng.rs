//! RNG module - seedable random source for tiles, pieces and spawn columns
//!
//! Every random decision the engine makes goes through [`RandomSource`], so a
//! driver can inject any generator and tests can pin outcomes with a seed.
//! [`SimpleRng`] is the default: a small LCG whose full state fits in a `u32`
//! and can therefore be saved alongside a session.

use crate::types::PieceKind;

/// Source of randomness injected into tile and tetromino construction
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Random value in range [0, max). `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Uniformly chosen piece kind
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Rebuild a generator from a saved [`state`](Self::state), without seed remapping
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG cycle with short periods.
        self.state >> 8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
