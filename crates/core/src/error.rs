//! Errors raised at the engine's fallible edges: config loading and restoring
//! saved sessions. Gameplay itself reports rejected moves as plain `bool`s.

use thiserror::Error;

/// A saved session that cannot be turned back into a live one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile value {value} (must be a power of two from 2 to 2^30)")]
    InvalidTileValue { value: u32 },

    #[error("{kind} piece matrix must be {expected}x{expected} with 4 tiles")]
    InvalidPieceMatrix { kind: &'static str, expected: usize },

    #[error("footprint of {rows}x{cols} exceeds the 4x4 piece limit")]
    FootprintTooLarge { rows: usize, cols: usize },

    #[error("grid {height}x{width} is too small (each side must be at least {min})")]
    GridTooSmall {
        height: usize,
        width: usize,
        min: usize,
    },

    #[error("active piece overlaps a locked tile at ({x}, {y})")]
    PieceOverlap { x: i32, y: i32 },
}

/// Invalid or unparsable configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {var}={value:?} is not a valid number")]
    InvalidNumber { var: &'static str, value: String },

    #[error("grid {height}x{width} is too small (each side must be at least {min})")]
    GridTooSmall {
        height: usize,
        width: usize,
        min: usize,
    },

    #[error("fall delay must be positive")]
    ZeroFallDelay,
}
