//! Session module - the state a driver carries between engine calls
//!
//! A session ties the grid to the active, next and held pieces, plus the
//! gravity delay and level. The driver owns it and calls [`Session::tick`]
//! once per gravity interval and [`Session::apply_action`] per input; nothing
//! here runs on its own.

use log::{debug, info};

use crate::config::GameConfig;
use crate::error::{ConfigError, RestoreError};
use crate::grid::{Grid, LockEvent};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{GridSnapshot, PieceSnapshot, SessionSnapshot};
use crate::tetromino::Tetromino;
use crate::types::{
    Direction, GameAction, FALL_DELAY_STEP_MS, LINES_PER_LEVEL, MIN_FALL_DELAY_MS,
    MIN_GRID_SIDE, STARTING_LEVEL,
};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active piece moved down one row
    Moved,
    /// The active piece locked; the next one is now active
    Locked(LockEvent),
    /// The lock overflowed the board, or the session had already ended
    GameOver,
}

/// Complete driver-facing game state
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    active: Option<Tetromino>,
    next: Tetromino,
    hold: Option<Tetromino>,
    hold_used: bool,
    fall_delay_ms: u32,
    level: u32,
    rng: SimpleRng,
}

impl Session {
    /// Start a new session with an empty grid and two random pieces
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimpleRng::new(config.seed);
        let (height, width) = (config.grid_height, config.grid_width);
        let active = spawn_random(height, width, &mut rng);
        let next = spawn_random(height, width, &mut rng);

        Ok(Self {
            grid: Grid::new(height, width),
            active: Some(active),
            next,
            hold: None,
            hold_used: false,
            fall_delay_ms: config.initial_fall_delay_ms,
            level: STARTING_LEVEL,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn hold_piece(&self) -> Option<&Tetromino> {
        self.hold.as_ref()
    }

    /// Whether hold was already used for the current piece
    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Current delay between gravity steps
    pub fn fall_delay_ms(&self) -> u32 {
        self.fall_delay_ms
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.grid.score()
    }

    pub fn game_over(&self) -> bool {
        self.grid.game_over() || self.active.is_none()
    }

    /// Apply a game action; returns whether anything changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::MoveDown => self.try_move(Direction::Down),
            GameAction::HardDrop => {
                let mut moved = false;
                while self.try_move(Direction::Down) {
                    moved = true;
                }
                moved
            }
            GameAction::Rotate => match self.active.as_mut() {
                Some(active) => active.try_rotate(&self.grid),
                None => false,
            },
            GameAction::Hold => self.hold(),
        }
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        match self.active.as_mut() {
            Some(active) => active.try_move(direction, &self.grid),
            None => false,
        }
    }

    /// Stash the active piece, once per piece.
    ///
    /// With an empty hold the next piece becomes active; otherwise the active
    /// and held pieces swap. The incoming piece restarts at the spawn row in a
    /// fresh random column.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(current) = self.active.take() else {
            return false;
        };

        let mut incoming = match self.hold.take() {
            Some(held) => held,
            None => {
                let fresh = spawn_random(self.grid.height(), self.grid.width(), &mut self.rng);
                std::mem::replace(&mut self.next, fresh)
            }
        };
        incoming.reposition(self.grid.height(), self.grid.width(), &mut self.rng);
        debug!("hold {:?}, now playing {:?}", current.kind(), incoming.kind());

        self.hold = Some(current);
        self.active = Some(incoming);
        self.hold_used = true;
        true
    }

    /// One gravity step: move the active piece down, or lock it.
    ///
    /// On a lock the footprint goes to the grid, the next piece becomes active,
    /// a new next piece is drawn, hold is re-enabled and leveling is applied.
    pub fn tick(&mut self) -> TickOutcome {
        if self.grid.game_over() {
            return TickOutcome::GameOver;
        }
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::GameOver;
        };
        if active.try_move(Direction::Down, &self.grid) {
            return TickOutcome::Moved;
        }

        let Some(landed) = self.active.take() else {
            return TickOutcome::GameOver;
        };
        if self.grid.lock_and_resolve(landed.into_footprint()) {
            info!(
                "game over: score {} after {} lines",
                self.grid.score(),
                self.grid.cleared_lines()
            );
            return TickOutcome::GameOver;
        }
        let event = self.grid.take_last_event().unwrap_or_default();

        let fresh = spawn_random(self.grid.height(), self.grid.width(), &mut self.rng);
        self.active = Some(std::mem::replace(&mut self.next, fresh));
        self.hold_used = false;
        self.apply_leveling();

        TickOutcome::Locked(event)
    }

    /// Level up once per `LINES_PER_LEVEL` cleared rows, speeding up gravity
    fn apply_leveling(&mut self) {
        while self.grid.cleared_lines() >= self.level * LINES_PER_LEVEL {
            self.level += 1;
            self.fall_delay_ms = self
                .fall_delay_ms
                .saturating_sub(FALL_DELAY_STEP_MS)
                .max(MIN_FALL_DELAY_MS);
            info!("level {} (fall delay {}ms)", self.level, self.fall_delay_ms);
        }
    }

    /// Capture the full session state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: GridSnapshot::from(&self.grid),
            active: self.active.as_ref().map(PieceSnapshot::from),
            next: PieceSnapshot::from(&self.next),
            hold: self.hold.as_ref().map(PieceSnapshot::from),
            hold_used: self.hold_used,
            fall_delay_ms: self.fall_delay_ms,
            level: self.level,
            rng_state: self.rng.state(),
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// Besides each part being well-formed, the grid must meet the minimum
    /// size and the active piece must not overlap a locked tile.
    pub fn restore(snapshot: &SessionSnapshot) -> Result<Self, RestoreError> {
        let grid = snapshot.grid.to_grid()?;
        if grid.height() < MIN_GRID_SIDE || grid.width() < MIN_GRID_SIDE {
            return Err(RestoreError::GridTooSmall {
                height: grid.height(),
                width: grid.width(),
                min: MIN_GRID_SIDE,
            });
        }

        let active = snapshot
            .active
            .as_ref()
            .map(PieceSnapshot::to_tetromino)
            .transpose()?;
        if let Some(piece) = &active {
            for (x, y, _) in piece.occupancy_for_rendering() {
                if grid.is_occupied(y, x) {
                    return Err(RestoreError::PieceOverlap { x, y });
                }
            }
        }
        let next = snapshot.next.to_tetromino()?;
        let hold = snapshot
            .hold
            .as_ref()
            .map(PieceSnapshot::to_tetromino)
            .transpose()?;

        debug!(
            "restored {}x{} session at level {}",
            grid.height(),
            grid.width(),
            snapshot.level
        );

        Ok(Self {
            grid,
            active,
            next,
            hold,
            hold_used: snapshot.hold_used,
            fall_delay_ms: snapshot.fall_delay_ms,
            level: snapshot.level,
            rng: SimpleRng::from_state(snapshot.rng_state),
        })
    }
}

fn spawn_random(height: usize, width: usize, rng: &mut SimpleRng) -> Tetromino {
    let kind = rng.next_kind();
    Tetromino::spawn(kind, height, width, rng)
}
