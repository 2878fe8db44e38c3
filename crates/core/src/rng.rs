//! RNG module - deterministic color dealing
//!
//! Board generation only needs a cheap, reproducible source of indices, so the
//! engine carries its own LCG instead of an OS-seeded generator. The same seed
//! always deals the same board, which keeps tests and replays deterministic.

use crate::types::{ColorId, ColorSet};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick a uniformly random color from `set`, `None` if it is empty
    pub fn pick_color(&mut self, set: ColorSet) -> Option<ColorId> {
        if set.is_empty() {
            return None;
        }
        let n = self.next_range(set.len() as u32) as usize;
        set.nth(n)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
