//! Core engine types: configuration, RNG, row transforms, the grid, and
//! validated state snapshots.
//!
//! Nothing in here reads input or renders output - the engine is a pure
//! state machine that a driver calls into.

pub mod config;
pub mod grid;
pub mod line;
pub mod rng;
pub mod state;

pub use config::{ConfigError, GridConfig};
pub use grid::{Coord, Direction, Grid};
pub use rng::{SpawnRng, SpawnRngState};
pub use state::{GridSnapshot, StateError};
