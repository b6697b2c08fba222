//! Scenario loading: validated snapshots of grid state.
//!
//! Loading a hand-built board is a first-class, validated operation rather
//! than an ad hoc overwrite of live fields. A [`GridSnapshot`] captures
//! everything needed to reproduce a position (configuration, cells, score),
//! and [`Grid::from_state`] refuses boards that break the tile-value
//! invariant: every non-zero cell must hold `base^k` for some `k >= 1`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{ConfigError, GridConfig};
use super::grid::Grid;
use super::rng::SpawnRng;

/// Errors from loading an externally supplied grid state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// The configuration itself is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The cell buffer does not match the configured grid size.
    #[error("expected {expected} cells for a {size}x{size} grid, got {actual}")]
    DimensionMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },

    /// A non-zero cell holds a value outside the `base^k` domain.
    #[error("cell ({row}, {col}) holds {value}, which is not a positive power of base {base}")]
    InvalidTileValue {
        row: usize,
        col: usize,
        value: u64,
        base: u64,
    },
}

/// A serializable point-in-time capture of a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Merge arity.
    pub base: u64,
    /// Edge length of the square grid.
    pub size: usize,
    /// Whether the adjacency-merge pass is enabled.
    pub post_merge: bool,
    /// Cells, row-major. 0 = empty.
    pub cells: Vec<u64>,
    /// Score at capture time.
    pub score: u64,
}

impl Grid {
    /// Build a grid from an externally supplied board and score.
    ///
    /// Validates the configuration, the buffer dimensions, and the
    /// tile-value invariant before accepting the state. No tiles are
    /// spawned; the board is taken exactly as given.
    ///
    /// ```
    /// use fusegrid::{Grid, GridConfig, SpawnRng};
    ///
    /// let cells = vec![
    ///     9, 3, 0, 0, 0,
    ///     0, 0, 0, 0, 0,
    ///     0, 0, 0, 0, 0,
    ///     0, 0, 0, 0, 0,
    ///     0, 0, 0, 0, 0,
    /// ];
    /// let grid = Grid::from_state(GridConfig::new(3, 5), cells, 9, SpawnRng::new(1)).unwrap();
    /// assert_eq!(grid.score(), 9);
    /// ```
    pub fn from_state(
        config: GridConfig,
        cells: Vec<u64>,
        score: u64,
        rng: SpawnRng,
    ) -> Result<Self, StateError> {
        config.validate()?;

        if cells.len() != config.cell_count() {
            return Err(StateError::DimensionMismatch {
                size: config.size,
                expected: config.cell_count(),
                actual: cells.len(),
            });
        }

        for (idx, &value) in cells.iter().enumerate() {
            if value != 0 && !is_power_of_base(value, config.base) {
                return Err(StateError::InvalidTileValue {
                    row: idx / config.size,
                    col: idx % config.size,
                    value,
                    base: config.base,
                });
            }
        }

        Ok(Grid::from_parts(config, cells, score, rng))
    }

    /// Capture the current position as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let config = self.config();
        GridSnapshot {
            base: config.base,
            size: config.size,
            post_merge: config.post_merge,
            cells: self.cells().to_vec(),
            score: self.score(),
        }
    }

    /// Restore a grid from a snapshot, re-validating it.
    pub fn from_snapshot(snapshot: GridSnapshot, rng: SpawnRng) -> Result<Self, StateError> {
        let mut config = GridConfig::new(snapshot.base, snapshot.size);
        if snapshot.post_merge {
            config = config.with_post_merge();
        }
        Grid::from_state(config, snapshot.cells, snapshot.score, rng)
    }
}

/// True if `value` equals `base^k` for some `k >= 1`.
fn is_power_of_base(value: u64, base: u64) -> bool {
    if value < base {
        return false;
    }
    let mut rest = value;
    while rest % base == 0 {
        rest /= base;
    }
    rest == 1
}
