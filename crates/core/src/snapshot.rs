//! Serializable session state for save/resume.
//!
//! Tile values are stored as plain numbers (0 for an empty cell) so a snapshot
//! is readable JSON and restores without losing any value or position. Grid
//! rows are stored bottom-first, piece matrices top-down, matching the way each
//! structure is indexed in the engine.

use serde::{Deserialize, Serialize};

use crate::error::RestoreError;
use crate::grid::Grid;
use crate::tetromino::Tetromino;
use crate::types::PieceKind;

/// A piece's type, position and tile values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub tiles: Vec<Vec<u32>>,
}

impl From<&Tetromino> for PieceSnapshot {
    fn from(value: &Tetromino) -> Self {
        let (x, y) = value.position();
        Self {
            kind: value.kind(),
            x,
            y,
            tiles: value.to_rows(),
        }
    }
}

impl PieceSnapshot {
    pub fn to_tetromino(&self) -> Result<Tetromino, RestoreError> {
        Tetromino::from_values(self.kind, &self.tiles, self.x, self.y)
    }
}

/// Grid cells plus its counters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: Vec<Vec<u32>>,
    pub score: u32,
    pub cleared_lines: u32,
    pub game_over: bool,
}

impl From<&Grid> for GridSnapshot {
    fn from(value: &Grid) -> Self {
        Self {
            rows: value.to_rows(),
            score: value.score(),
            cleared_lines: value.cleared_lines(),
            game_over: value.game_over(),
        }
    }
}

impl GridSnapshot {
    pub fn to_grid(&self) -> Result<Grid, RestoreError> {
        let mut grid = Grid::from_rows(&self.rows)?;
        grid.restore_counters(self.score, self.cleared_lines, self.game_over);
        Ok(grid)
    }
}

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: GridSnapshot,
    /// None once the game is over
    pub active: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
    pub hold: Option<PieceSnapshot>,
    pub hold_used: bool,
    pub fall_delay_ms: u32,
    pub level: u32,
    pub rng_state: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.grid.game_over && self.active.is_some()
    }
}
