//! Grid module - the persistent board of locked tiles
//!
//! The grid is `height` rows by `width` columns stored as a flat row-major
//! vector. Coordinates are `(row, col)` with row 0 as the floor, growing
//! upwards. Queries take signed coordinates so callers can probe positions
//! outside the board; anything out of bounds is never occupied.
//!
//! Locking a piece runs the whole resolution cycle:
//! place tiles, merge equal vertical neighbours in the touched columns,
//! settle floating tiles, repeat until no merge happens, then clear full rows
//! and settle once more.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::error::RestoreError;
use crate::tetromino::{Footprint, MAX_PIECE_SIDE};
use crate::tile::{is_valid_value, Tile};

/// A grid cell: empty or holding exactly one tile
pub type Cell = Option<Tile>;

/// Summary of one `lock_and_resolve` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// The footprint overflowed the board; nothing was resolved
    pub game_over: bool,
    pub merges: u32,
    /// Sum of the merged tile values
    pub merge_score: u32,
    pub lines_cleared: u32,
    /// Sum of the tile values in cleared rows
    pub clear_score: u32,
}

/// The board: locked tiles, score and cleared-line counter
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col), row 0 at the bottom
    cells: Vec<Cell>,
    score: u32,
    cleared_lines: u32,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl Grid {
    /// Create a new empty grid.
    ///
    /// A zero-sized grid is accepted but holds nothing; sessions require
    /// each side to be at least [`MIN_GRID_SIDE`](crate::types::MIN_GRID_SIDE).
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![None; height * width],
            score: 0,
            cleared_lines: 0,
            game_over: false,
            last_event: None,
        }
    }

    /// Build a grid from tile values, bottom row first; 0 marks an empty cell.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, RestoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(RestoreError::EmptyGrid);
        }

        let mut grid = Self::new(height, width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(RestoreError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_valid_value(value) {
                    return Err(RestoreError::InvalidTileValue { value });
                }
                grid.cells[row * width + col] = Some(Tile::with_value(value));
            }
        }
        Ok(grid)
    }

    /// Tile values row by row, bottom row first; 0 marks an empty cell.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.map_or(0, |t| t.value())).collect())
            .collect()
    }

    /// Reinstate counters saved alongside the cell contents
    pub(crate) fn restore_counters(&mut self, score: u32, cleared_lines: u32, game_over: bool) {
        self.score = score;
        self.cleared_lines = cleared_lines;
        self.game_over = game_over;
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of rows cleared this session
    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    /// True once a lock has overflowed the board
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Take and clear the summary of the last lock.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Whether (row, col) lies on the board
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height || self.width == 0 {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Lock a footprint onto the board and resolve merges, clears and gravity.
    ///
    /// Returns true when the lock overflowed the board (game over). In-bounds
    /// cells of an overflowing footprint are still placed, but nothing is
    /// resolved. Once over, the grid refuses further locks.
    pub fn lock_and_resolve(&mut self, footprint: Footprint) -> bool {
        if self.game_over {
            return true;
        }

        let mut event = LockEvent::default();
        let mut affected: ArrayVec<usize, MAX_PIECE_SIDE> = ArrayVec::new();
        let mut overflow = false;

        for (x, y, tile) in footprint.board_tiles() {
            if self.set(y, x, Some(tile)) {
                let col = x as usize;
                if !affected.contains(&col) {
                    affected.push(col);
                }
            } else {
                overflow = true;
            }
        }

        if overflow {
            info!("lock overflowed the board at ({}, {})", footprint.x(), footprint.y());
            self.game_over = true;
            event.game_over = true;
            self.last_event = Some(event);
            return true;
        }

        loop {
            let (merges, merge_score) = self.merge_pass(&affected);
            if merges == 0 {
                break;
            }
            event.merges += merges;
            event.merge_score = event.merge_score.saturating_add(merge_score);
            self.settle();
        }

        let (lines, clear_score) = self.clear_pass();
        event.lines_cleared = lines;
        event.clear_score = clear_score;
        self.settle();

        self.last_event = Some(event);
        false
    }

    /// One bottom-up merge sweep over `columns`; true if anything merged.
    ///
    /// Comparing `row` with `row + 1`, the lower tile absorbs the upper one.
    /// After a merge the consumed row is skipped, so three stacked equal tiles
    /// merge once, not twice.
    pub fn merge_columns(&mut self, columns: &[usize]) -> bool {
        let (merges, _) = self.merge_pass(columns);
        merges > 0
    }

    fn merge_pass(&mut self, columns: &[usize]) -> (u32, u32) {
        let mut merges = 0;
        let mut gained = 0u32;

        for &col in columns {
            if col >= self.width {
                continue;
            }
            let mut row = 0;
            while row + 1 < self.height {
                let lower_idx = row * self.width + col;
                let upper_idx = lower_idx + self.width;

                if let (Some(lower), Some(upper)) = (self.cells[lower_idx], self.cells[upper_idx]) {
                    if lower.can_merge(&upper) {
                        let mut merged = lower;
                        merged.merge(&upper);
                        self.cells[lower_idx] = Some(merged);
                        self.cells[upper_idx] = None;

                        debug!("merge at ({}, {}) -> {}", row, col, merged.value());
                        self.score = self.score.saturating_add(merged.value());
                        gained = gained.saturating_add(merged.value());
                        merges += 1;
                        row += 1;
                    }
                }
                row += 1;
            }
        }

        (merges, gained)
    }

    /// Clear every full row, shifting the rows above down.
    ///
    /// Returns the number of rows cleared. Their tile values are added to the
    /// score and each row bumps the cleared-line counter.
    pub fn clear_full_rows(&mut self) -> u32 {
        self.clear_pass().0
    }

    fn clear_pass(&mut self) -> (u32, u32) {
        let mut lines = 0;
        let mut gained = 0u32;

        let mut row = 0;
        while row < self.height {
            if !self.is_row_full(row) {
                row += 1;
                continue;
            }

            let start = row * self.width;
            let row_sum = self.cells[start..start + self.width]
                .iter()
                .flatten()
                .fold(0u32, |acc, tile| acc.saturating_add(tile.value()));
            debug!("clearing row {} worth {}", row, row_sum);

            gained = gained.saturating_add(row_sum);
            lines += 1;
            // Content shifts down, so the same index is tested again.
            self.remove_row(row);
        }

        self.score = self.score.saturating_add(gained);
        self.cleared_lines += lines;
        (lines, gained)
    }

    /// Delete a row and shift all rows above down; the top row becomes empty
    fn remove_row(&mut self, row: usize) {
        let width = self.width;
        let start = row * width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width.., start);

        let top = (self.height - 1) * width;
        for cell in &mut self.cells[top..] {
            *cell = None;
        }
    }

    /// Drop every tile not connected to the floor.
    ///
    /// Grounded tiles are those reachable from an occupied bottom-row cell
    /// through 4-connected occupied neighbours. Everything else falls straight
    /// down in its own column onto the next occupied cell or the floor, keeping
    /// column order. Returns the number of tiles moved.
    pub fn settle(&mut self) -> usize {
        let grounded = self.grounded_mask();
        let width = self.width;
        let mut moved = 0;

        for col in 0..width {
            for row in 1..self.height {
                let idx = row * width + col;
                if self.cells[idx].is_none() || grounded[idx] {
                    continue;
                }

                let mut dest = row;
                while dest > 0 && self.cells[(dest - 1) * width + col].is_none() {
                    dest -= 1;
                }
                if dest != row {
                    self.cells[dest * width + col] = self.cells[idx].take();
                    moved += 1;
                }
            }
        }

        moved
    }

    /// Flood fill from the occupied floor cells
    fn grounded_mask(&self) -> Vec<bool> {
        let width = self.width;
        let mut grounded = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        for col in 0..width {
            if self.cells[col].is_some() {
                grounded[col] = true;
                queue.push_back((0i32, col as i32));
            }
        }

        while let Some((row, col)) = queue.pop_front() {
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let (nr, nc) = (row + dr, col + dc);
                if let Some(idx) = self.index(nr, nc) {
                    if !grounded[idx] && self.cells[idx].is_some() {
                        grounded[idx] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }
        }

        grounded
    }

    /// Whether every occupied cell is connected to the floor
    pub fn is_settled(&self) -> bool {
        let grounded = self.grounded_mask();
        self.cells
            .iter()
            .zip(grounded)
            .all(|(cell, grounded)| cell.is_none() || grounded)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board (score and counters are kept)
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
