//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rule engine of a falling-block puzzle where locked
//! pieces break into numbered tiles that merge 2048-style. It has no
//! dependencies on rendering, input or I/O:
//!
//! - **Deterministic**: every random draw goes through an injected, seedable source
//! - **Synchronous**: each call runs to completion; the driver owns all timing
//! - **Serializable**: the full session state round-trips through serde
//!
//! # Module Structure
//!
//! - [`tile`]: numbered tile and its value-derived colors
//! - [`tetromino`]: piece shapes, movement, rotation, footprint extraction
//! - [`grid`]: locking, merge chaining, row clearing, gravity settling, scoring
//! - [`session`]: active/next/hold pieces, leveling, gravity tick
//! - [`snapshot`]: save/resume state
//! - [`rng`]: seedable random source
//! - [`config`]: session settings with environment overrides
//!
//! # Game Rules
//!
//! - Pieces spawn above the top row in a random column and fall one row per tick
//! - Rotation is clockwise with no wall kicks
//! - On landing, tiles lock into the grid; a tile outside the board ends the game
//! - Equal tiles stacked vertically in the touched columns merge bottom-up
//! - Tiles disconnected from the floor fall after every merge round
//! - Full rows clear and score the sum of their tiles
//! - Every 5 cleared rows raise the level and shorten the fall delay
//!
//! # Example
//!
//! ```
//! use tetris_2048_core::{GameConfig, Session, TickOutcome};
//! use tetris_2048_types::GameAction;
//!
//! let mut session = Session::new(&GameConfig::default()).unwrap();
//!
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! // The next tick cannot move the piece down, so it locks.
//! assert!(matches!(session.tick(), TickOutcome::Locked(_)));
//! assert!(session.grid().tile_count() > 0);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod tetromino;
pub mod tile;

pub use tetris_2048_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use error::{ConfigError, RestoreError};
pub use grid::{Cell, Grid, LockEvent};
pub use rng::{RandomSource, SimpleRng};
pub use session::{Session, TickOutcome};
pub use snapshot::{GridSnapshot, PieceSnapshot, SessionSnapshot};
pub use tetromino::{get_shape, Footprint, Tetromino};
pub use tile::{Tile, MAX_TILE_VALUE};
