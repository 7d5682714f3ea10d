//! Tile module - the numeric unit that pieces are built from and grids hold
//!
//! A tile carries a power-of-two value. Display colors are a pure function of
//! that value, so they are looked up on demand and can never go stale after a
//! merge.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::types::{
    Rgb, TILE_BORDER, TILE_FALLBACK_BACKGROUND, TILE_PALETTE, TILE_TEXT_DARK, TILE_TEXT_LIGHT,
};

/// Largest value a tile can hold; two of these never merge
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// A single numbered tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    value: u32,
}

impl Tile {
    /// New tile valued 2 or 4 with equal probability
    pub fn create(rng: &mut impl RandomSource) -> Self {
        let value = if rng.next_range(2) == 0 { 2 } else { 4 };
        Self { value }
    }

    /// Tile with an explicit value (for restoring and testing)
    pub fn with_value(value: u32) -> Self {
        debug_assert!(
            is_valid_value(value),
            "tile value must be a power of two >= 2"
        );
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Whether `other` can be absorbed: equal values below [`MAX_TILE_VALUE`]
    pub fn can_merge(&self, other: &Tile) -> bool {
        self.value == other.value && self.value < MAX_TILE_VALUE
    }

    /// Absorb an equal-valued tile, doubling this one.
    ///
    /// Callers check [`can_merge`](Self::can_merge) first; `other` is dropped
    /// by the caller afterwards.
    pub fn merge(&mut self, other: &Tile) {
        debug_assert_eq!(self.value, other.value, "merge requires equal values");
        if self.can_merge(other) {
            self.value *= 2;
        }
    }

    /// Background color for the current value
    pub fn background(&self) -> Rgb {
        TILE_PALETTE
            .iter()
            .find(|(value, _)| *value == self.value)
            .map(|(_, color)| *color)
            .unwrap_or(TILE_FALLBACK_BACKGROUND)
    }

    /// Text color: dark for 2 and 4, light above
    pub fn foreground(&self) -> Rgb {
        if self.value <= 4 {
            TILE_TEXT_DARK
        } else {
            TILE_TEXT_LIGHT
        }
    }

    pub fn border(&self) -> Rgb {
        TILE_BORDER
    }
}

/// Whether `value` can be held by a tile
pub fn is_valid_value(value: u32) -> bool {
    (2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two()
}
