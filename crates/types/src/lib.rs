//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond parsing and lookup, so they
//! can be used by the rule engine, a renderer, or a save/resume layer alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (overridable through the session config):
//!
//! - **Width**: 16 columns (indexed 0-15, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the floor)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_FALL_DELAY_MS` | 300 | Delay between gravity steps at level 1 |
//! | `FALL_DELAY_STEP_MS` | 20 | Delay removed on every level up |
//! | `MIN_FALL_DELAY_MS` | 50 | Fastest possible gravity |
//! | `LINES_PER_LEVEL` | 5 | Cleared rows needed per level |
//!
//! # Examples
//!
//! ```
//! use tetris_2048_types::{Direction, GameAction, PieceKind, DEFAULT_GRID_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.matrix_size(), 3);
//!
//! assert_eq!(Direction::from_str("down"), Some(Direction::Down));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(DEFAULT_GRID_WIDTH, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (16 columns)
pub const DEFAULT_GRID_WIDTH: usize = 16;

/// Default board height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: usize = 20;

/// Smallest board side that can hold every piece in every orientation
pub const MIN_GRID_SIDE: usize = 4;

/// Gravity interval at level 1
pub const INITIAL_FALL_DELAY_MS: u32 = 300;

/// Gravity interval is reduced by this much on each level up
pub const FALL_DELAY_STEP_MS: u32 = 20;

/// Gravity interval floor
pub const MIN_FALL_DELAY_MS: u32 = 50;

/// Cleared rows required per level
pub const LINES_PER_LEVEL: u32 = 5;

/// Level a new session starts at
pub const STARTING_LEVEL: u32 = 1;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    Z,
    S,
    T,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order random draws index into
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Side length of the square local matrix the piece lives in
    ///
    /// ```
    /// use tetris_2048_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.matrix_size(), 4);
    /// assert_eq!(PieceKind::O.matrix_size(), 2);
    /// assert_eq!(PieceKind::L.matrix_size(), 3);
    /// ```
    pub fn matrix_size(&self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }
}

/// Translation directions accepted by the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }

    /// Board-space offset `(dx, dy)` of one step, y pointing up
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
        }
    }
}

/// Game actions a driver can apply to a session
///
/// These are the only mutating inputs besides the gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Repeat the down move until it is rejected (the piece locks on the next tick)
    HardDrop,
    /// Rotate piece 90° clockwise, no wall kicks
    Rotate,
    /// Stash the current piece (once per piece)
    Hold,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
        }
    }
}

/// 8-bit RGB color used for tile display attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Tile background by value, 2 through 2048
pub const TILE_PALETTE: [(u32, Rgb); 11] = [
    (2, Rgb(240, 235, 225)),
    (4, Rgb(235, 225, 210)),
    (8, Rgb(230, 200, 170)),
    (16, Rgb(225, 180, 140)),
    (32, Rgb(220, 160, 110)),
    (64, Rgb(215, 140, 90)),
    (128, Rgb(210, 120, 70)),
    (256, Rgb(205, 100, 50)),
    (512, Rgb(200, 80, 30)),
    (1024, Rgb(190, 60, 20)),
    (2048, Rgb(175, 45, 5)),
];

/// Background for values past the palette
pub const TILE_FALLBACK_BACKGROUND: Rgb = Rgb(100, 100, 100);

/// Text color for 2 and 4
pub const TILE_TEXT_DARK: Rgb = Rgb(60, 60, 60);

/// Text color for 8 and above
pub const TILE_TEXT_LIGHT: Rgb = Rgb(255, 255, 255);

/// Tile outline
pub const TILE_BORDER: Rgb = Rgb(0, 0, 0);
