//! Headless runner (default binary).
//!
//! Plays one seeded session with a simple random policy: each new piece is
//! lowered into the board, turned and shifted a random amount, then hard
//! dropped. Stops on game over or after `TETRIS2048_MAX_PIECES` locks and
//! prints the final session snapshot as JSON.

use anyhow::{Context, Result};
use log::{debug, info};

use tetris_2048::core::{GameConfig, RandomSource, Session, SimpleRng, TickOutcome};
use tetris_2048::types::GameAction;

const DEFAULT_MAX_PIECES: u32 = 500;

fn main() -> Result<()> {
    env_logger::init();

    let config = GameConfig::from_env().context("invalid configuration")?;
    let max_pieces = max_pieces_from_env()?;
    let mut session = Session::new(&config).context("failed to start session")?;
    let mut policy = SimpleRng::new(config.seed.wrapping_add(1));

    info!(
        "starting {}x{} session, seed {}, up to {} pieces",
        config.grid_height, config.grid_width, config.seed, max_pieces
    );

    let mut pieces = 0u32;
    let mut ticks = 0u64;
    play_piece(&mut session, &mut policy);

    loop {
        ticks += 1;
        match session.tick() {
            TickOutcome::Moved => {}
            TickOutcome::Locked(event) => {
                pieces += 1;
                debug!(
                    "piece {}: {} merges (+{}), {} lines (+{})",
                    pieces, event.merges, event.merge_score, event.lines_cleared, event.clear_score
                );
                if pieces >= max_pieces {
                    break;
                }
                play_piece(&mut session, &mut policy);
            }
            TickOutcome::GameOver => break,
        }
    }

    info!(
        "finished after {} pieces / {} ticks: score {}, level {}, {} lines{}",
        pieces,
        ticks,
        session.score(),
        session.level(),
        session.grid().cleared_lines(),
        if session.game_over() { " (game over)" } else { "" }
    );

    let snapshot = session.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?
    );
    Ok(())
}

fn max_pieces_from_env() -> Result<u32> {
    match std::env::var("TETRIS2048_MAX_PIECES") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("TETRIS2048_MAX_PIECES={:?} is not a number", raw)),
        Err(_) => Ok(DEFAULT_MAX_PIECES),
    }
}

/// Steer the freshly spawned piece, then drop it
fn play_piece(session: &mut Session, policy: &mut impl RandomSource) {
    // Spawned pieces hang above the board and cannot rotate until inside it.
    for _ in 0..3 {
        session.apply_action(GameAction::MoveDown);
    }
    for _ in 0..policy.next_range(4) {
        session.apply_action(GameAction::Rotate);
    }

    let shift = policy.next_range(9) as i32 - 4;
    let action = if shift < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    for _ in 0..shift.unsigned_abs() {
        session.apply_action(action);
    }

    session.apply_action(GameAction::HardDrop);
}
