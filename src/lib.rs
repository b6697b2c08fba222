//! # fusegrid
//!
//! A generalized tile-merging puzzle engine: an N x N grid of numeric tiles
//! where moves slide and merge tiles according to a configurable **base**,
//! the merge arity. Base 2 on a 4x4 grid is the classic 2048 rule; base 3
//! requires runs of three equal tiles, which fuse into their triple, and so
//! on for any arity.
//!
//! ## Design Principles
//!
//! 1. **Arity-Agnostic**: No hardcoded grid size or merge count. A
//!    [`GridConfig`] fixes `base`, `size`, and the optional adjacency-merge
//!    pass at construction, and validation rejects unplayable combinations.
//!
//! 2. **Driver-Agnostic**: The engine owns board state and transitions only.
//!    Reading input, rendering, and pacing live in whatever driver calls it.
//!
//! 3. **Deterministic**: Spawning is the only randomness, and it flows
//!    through a seeded, serializable [`SpawnRng`]. Same seed, same game.
//!
//! ## Quick start
//!
//! ```
//! use fusegrid::{Direction, GridConfig, Session, StepOutcome};
//!
//! let mut session = Session::new(GridConfig::new(2, 4), 42).unwrap();
//!
//! while !session.is_over() {
//!     // A driver would map keys to directions; here we just sweep.
//!     let accepted = Direction::ALL
//!         .into_iter()
//!         .any(|d| session.step(d) != StepOutcome::Rejected);
//!     if !accepted {
//!         break;
//!     }
//! }
//! println!("final score: {}", session.score());
//! ```
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, row transforms, the grid engine, snapshots
//! - `session`: the Active/Terminal state machine around a grid

pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Coord, Direction, Grid, GridConfig, GridSnapshot, SpawnRng, SpawnRngState,
    StateError,
};

pub use crate::session::{Session, SessionPhase, StepOutcome};
