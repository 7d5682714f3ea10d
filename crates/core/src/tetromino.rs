//! Tetromino module - piece shapes, movement, rotation and footprint extraction
//!
//! A piece lives in a square local matrix of side 2, 3 or 4 whose occupied
//! cells each own a tile. Local rows run top-down: local `(row, col)` maps to
//! board `x = x0 + col`, `y = y0 + (n - 1 - row)` where `(x0, y0)` is the
//! bottom-left corner of the matrix in board space. The shape table lists
//! cells column first.
//!
//! Rotation is a plain clockwise turn of the matrix, validated in place.
//! There is no kick table: a blocked rotation is simply rejected.

use arrayvec::ArrayVec;

use crate::error::RestoreError;
use crate::grid::{Cell, Grid};
use crate::rng::RandomSource;
use crate::tile::{is_valid_value, Tile};
use crate::types::{Direction, PieceKind};

/// Largest local matrix side (the I piece)
pub const MAX_PIECE_SIDE: usize = 4;

/// Occupied cells per piece
pub const PIECE_CELLS: usize = 4;

/// Local matrix storage, only the top-left `n x n` corner is used
pub type LocalMatrix = [[Cell; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];

/// Occupied `(col, row)` cells of a piece's local matrix, rows top-down
pub type PieceShape = [(usize, usize); PIECE_CELLS];

/// Get the spawn occupancy for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        // Vertical bar in the second column
        PieceKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::Z => [(0, 1), (1, 1), (1, 2), (2, 2)],
        PieceKind::S => [(1, 1), (2, 1), (0, 2), (1, 2)],
        PieceKind::T => [(0, 1), (1, 1), (2, 1), (1, 0)],
        PieceKind::J => [(0, 1), (1, 1), (2, 1), (2, 2)],
        PieceKind::L => [(0, 2), (0, 1), (1, 1), (2, 1)],
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct Tetromino {
    kind: PieceKind,
    size: usize,
    cells: LocalMatrix,
    x: i32,
    y: i32,
}

impl Tetromino {
    /// Create a piece above the board's top row in a random column.
    ///
    /// The bottom row of the local matrix sits on the top board row, so the
    /// piece drops into view. The column is uniform in `[0, width - n]`.
    pub fn spawn(
        kind: PieceKind,
        grid_height: usize,
        grid_width: usize,
        rng: &mut impl RandomSource,
    ) -> Self {
        let mut cells: LocalMatrix = [[None; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        for (col, row) in get_shape(kind) {
            cells[row][col] = Some(Tile::create(rng));
        }

        let mut piece = Self {
            kind,
            size: kind.matrix_size(),
            cells,
            x: 0,
            y: 0,
        };
        piece.reposition(grid_height, grid_width, rng);
        piece
    }

    /// Rebuild a piece from saved tile values (local rows top-down, 0 = empty)
    pub fn from_values(
        kind: PieceKind,
        values: &[Vec<u32>],
        x: i32,
        y: i32,
    ) -> Result<Self, RestoreError> {
        let size = kind.matrix_size();
        let bad_matrix = RestoreError::InvalidPieceMatrix {
            kind: kind.as_str(),
            expected: size,
        };
        if values.len() != size || values.iter().any(|row| row.len() != size) {
            return Err(bad_matrix);
        }

        let mut cells: LocalMatrix = [[None; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        let mut occupied = 0;
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_valid_value(value) {
                    return Err(RestoreError::InvalidTileValue { value });
                }
                cells[row][col] = Some(Tile::with_value(value));
                occupied += 1;
            }
        }
        if occupied != PIECE_CELLS {
            return Err(bad_matrix);
        }

        Ok(Self {
            kind,
            size,
            cells,
            x,
            y,
        })
    }

    /// Move back to the spawn row with a fresh random column
    pub fn reposition(&mut self, grid_height: usize, grid_width: usize, rng: &mut impl RandomSource) {
        let span = grid_width.saturating_sub(self.size) as u32 + 1;
        self.x = rng.next_range(span) as i32;
        self.y = grid_height as i32 - 1;
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side of the local matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Board-space bottom-left corner of the local matrix
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Tile at local (row, col); None if empty or outside the matrix
    pub fn tile_at(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row][col]
    }

    /// Tile values of the local matrix, rows top-down, 0 = empty
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells[..self.size]
            .iter()
            .map(|row| {
                row[..self.size]
                    .iter()
                    .map(|cell| cell.map_or(0, |t| t.value()))
                    .collect()
            })
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| self.cells[row][col].map(|tile| (row, col, tile)))
        })
    }

    /// Board coordinate `(x, y)` of local (row, col)
    pub fn cell_to_board(&self, row: usize, col: usize) -> (i32, i32) {
        (
            self.x + col as i32,
            self.y + (self.size - 1 - row) as i32,
        )
    }

    /// Board-space `(x, y, tile)` of every occupied cell, for renderers
    pub fn occupancy_for_rendering(&self) -> ArrayVec<(i32, i32, Tile), PIECE_CELLS> {
        self.occupied()
            .map(|(row, col, tile)| {
                let (x, y) = self.cell_to_board(row, col);
                (x, y, tile)
            })
            .collect()
    }

    /// Check if the piece can take one step in `direction`.
    ///
    /// Only the leading cell of each row (sideways) or column (down) can hit
    /// something; the rest of the piece moves into cells it already occupies.
    pub fn can_move(&self, direction: Direction, grid: &Grid) -> bool {
        let n = self.size;
        let width = grid.width() as i32;

        match direction {
            Direction::Left | Direction::Right => {
                let (dx, _) = direction.offset();
                for row in 0..n {
                    let leading = if direction == Direction::Left {
                        (0..n).find(|&col| self.cells[row][col].is_some())
                    } else {
                        (0..n).rev().find(|&col| self.cells[row][col].is_some())
                    };
                    let Some(col) = leading else {
                        continue;
                    };

                    let (x, y) = self.cell_to_board(row, col);
                    let target = x + dx;
                    if target < 0 || target >= width || grid.is_occupied(y, target) {
                        return false;
                    }
                }
            }
            Direction::Down => {
                for col in 0..n {
                    let Some(row) = (0..n).rev().find(|&row| self.cells[row][col].is_some())
                    else {
                        continue;
                    };

                    let (x, y) = self.cell_to_board(row, col);
                    if y == 0 || grid.is_occupied(y - 1, x) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Try to move the piece one step; returns whether it moved
    pub fn try_move(&mut self, direction: Direction, grid: &Grid) -> bool {
        if !self.can_move(direction, grid) {
            return false;
        }
        let (dx, dy) = direction.offset();
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate 90° clockwise in place if every rotated cell is on the board and free.
    ///
    /// The bottom-left corner stays put; on failure the piece is unchanged.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let rotated = self.rotated_cw();
        let n = self.size;

        for row in 0..n {
            for col in 0..n {
                if rotated[row][col].is_none() {
                    continue;
                }
                let x = self.x + col as i32;
                let y = self.y + (n - 1 - row) as i32;
                if !grid.is_inside(y, x) || grid.is_occupied(y, x) {
                    return false;
                }
            }
        }

        self.cells = rotated;
        true
    }

    /// Clockwise quarter turn: transpose, then reverse each row
    fn rotated_cw(&self) -> LocalMatrix {
        let n = self.size;
        let mut out: LocalMatrix = [[None; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        for row in 0..n {
            for col in 0..n {
                out[row][col] = self.cells[n - 1 - col][row];
            }
        }
        out
    }

    /// Occupied cells cropped to their bounding box, with the crop's bottom-left corner.
    ///
    /// The footprint holds its own copies of the tiles.
    pub fn footprint(&self) -> Footprint {
        let n = self.size;
        let (mut min_row, mut max_row) = (n - 1, 0);
        let (mut min_col, mut max_col) = (n - 1, 0);
        for (row, col, _) in self.occupied() {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
        }

        let mut cells: LocalMatrix = [[None; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                cells[row - min_row][col - min_col] = self.cells[row][col];
            }
        }

        Footprint {
            rows: max_row - min_row + 1,
            cols: max_col - min_col + 1,
            cells,
            x: self.x + min_col as i32,
            y: self.y + (n - 1 - max_row) as i32,
        }
    }

    /// Consume the piece, handing its tiles over as a footprint
    pub fn into_footprint(self) -> Footprint {
        self.footprint()
    }
}

/// Cropped tile matrix handed to the grid at lock time
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    rows: usize,
    cols: usize,
    cells: LocalMatrix,
    x: i32,
    y: i32,
}

impl Footprint {
    /// Build a footprint from tile values (rows top-down, 0 = empty) at bottom-left `(x, y)`
    pub fn from_values(values: &[&[u32]], x: i32, y: i32) -> Result<Self, RestoreError> {
        let rows = values.len();
        let cols = values.first().map_or(0, |row| row.len());
        if rows > MAX_PIECE_SIDE || cols > MAX_PIECE_SIDE {
            return Err(RestoreError::FootprintTooLarge { rows, cols });
        }

        let mut cells: LocalMatrix = [[None; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        for (row, line) in values.iter().enumerate() {
            if line.len() != cols {
                return Err(RestoreError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_valid_value(value) {
                    return Err(RestoreError::InvalidTileValue { value });
                }
                cells[row][col] = Some(Tile::with_value(value));
            }
        }

        Ok(Self {
            rows,
            cols,
            cells,
            x,
            y,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Board-space bottom-left corner
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row][col]
    }

    /// Board `(x, y, tile)` of every occupied cell, column by column
    pub fn board_tiles(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        (0..self.cols).flat_map(move |col| {
            (0..self.rows).filter_map(move |row| {
                self.cells[row][col].map(|tile| {
                    (
                        self.x + col as i32,
                        self.y + (self.rows - 1 - row) as i32,
                        tile,
                    )
                })
            })
        })
    }
}
