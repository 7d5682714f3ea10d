//! Tetris 2048 (workspace facade crate).
//!
//! Re-exports the engine as `tetris_2048::{core, types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_2048_core as core;
pub use tetris_2048_types as types;
