//! Session orchestration: the Active/Terminal state machine around a grid.
//!
//! A `Session` owns a [`Grid`] and enforces the rules a driver would
//! otherwise have to sequence by hand:
//!
//! - the adjacency fixed point is settled before the first move and after
//!   every accepted move (only when `post_merge` is configured);
//! - exactly one tile spawns after each accepted move;
//! - once no move can change the board, the session is `Terminal`, and
//!   Terminal is absorbing - further moves are rejected without touching
//!   the grid.
//!
//! Input reading and rendering stay outside: a driver maps its keys to
//! [`Direction`]s, calls [`Session::step`], and displays
//! [`Session::grid`] however it likes.

use serde::{Deserialize, Serialize};

use crate::core::config::{ConfigError, GridConfig};
use crate::core::grid::{Coord, Direction, Grid};
use crate::core::rng::SpawnRng;
use crate::core::state::{GridSnapshot, StateError};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Moves are being accepted.
    Active,
    /// No move can change the board. Absorbing.
    Terminal,
}

/// Result of one [`Session::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The move changed the board. Carries the coordinate of the spawned
    /// tile, or `None` when the session ended before a tile could spawn.
    Moved { spawned: Option<Coord> },
    /// The move left the board unchanged, or the session is already
    /// terminal. Nothing spawned, score untouched.
    Rejected,
}

impl StepOutcome {
    /// Whether the move was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

/// A playable game: a grid plus the Active/Terminal state machine.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    phase: SessionPhase,
}

impl Session {
    /// Start a session with a freshly seeded board.
    ///
    /// ```
    /// use fusegrid::{Direction, Session, GridConfig};
    ///
    /// let mut session = Session::new(GridConfig::new(2, 4), 42).unwrap();
    /// session.step(Direction::Left);
    /// ```
    pub fn new(config: GridConfig, seed: u64) -> Result<Self, ConfigError> {
        let grid = Grid::new(config, SpawnRng::new(seed))?;
        Ok(Self::start(grid))
    }

    /// Start a session seeded from the operating system.
    pub fn from_entropy(config: GridConfig) -> Result<Self, ConfigError> {
        let grid = Grid::new(config, SpawnRng::from_entropy())?;
        Ok(Self::start(grid))
    }

    /// Resume a session from a validated snapshot.
    pub fn from_snapshot(snapshot: GridSnapshot, seed: u64) -> Result<Self, StateError> {
        let grid = Grid::from_snapshot(snapshot, SpawnRng::new(seed))?;
        Ok(Self::start(grid))
    }

    fn start(mut grid: Grid) -> Self {
        settle(&mut grid);
        let phase = if grid.can_move() {
            SessionPhase::Active
        } else {
            SessionPhase::Terminal
        };
        Self { grid, phase }
    }

    /// The underlying grid, for rendering and inspection.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the session has reached its terminal state.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.grid.score()
    }

    /// Play one move.
    ///
    /// An accepted move settles the adjacency fixed point, spawns one tile
    /// (unless the board is already unplayable), settles again, and
    /// re-checks for the terminal state - a spawn can fill the last hole.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if self.phase == SessionPhase::Terminal {
            return StepOutcome::Rejected;
        }

        if !self.grid.apply_move(direction) {
            return StepOutcome::Rejected;
        }

        settle(&mut self.grid);

        if !self.grid.can_move() {
            self.phase = SessionPhase::Terminal;
            return StepOutcome::Moved { spawned: None };
        }

        let spawned = self.grid.spawn_tile();
        settle(&mut self.grid);

        if !self.grid.can_move() {
            self.phase = SessionPhase::Terminal;
        }

        StepOutcome::Moved { spawned }
    }
}

/// Run the adjacency-merge pass to its fixed point, when enabled.
fn settle(grid: &mut Grid) {
    if !grid.post_merge() {
        return;
    }
    while grid.adjacency_merge_pass() {}
}
