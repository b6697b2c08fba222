//! Engine configuration.
//!
//! A `GridConfig` fixes the three parameters that never change over the life
//! of a grid:
//! - `base`: the merge arity - how many identical adjacent tiles fuse into
//!   one tile of `base` times the value.
//! - `size`: the edge length of the square grid.
//! - `post_merge`: whether the adjacency-merge pass is enabled.
//!
//! The engine never hardcodes an arity or a grid size - callers configure
//! them at construction and `validate` rejects combinations that could never
//! produce a playable board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors rejected at construction time.
///
/// All three are fatal: no partially-constructed grid is ever returned.
/// Post-construction operations are total and cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Merge arity must allow at least a pair.
    #[error("base must be greater than 1, got {0}")]
    InvalidBase(u64),

    /// A grid no larger than the base can never hold a mergeable run.
    #[error("grid size must be greater than the base, got size {size} with base {base}")]
    InvalidSize { size: usize, base: u64 },

    /// Cost cap on the adjacency-merge pass.
    #[error("adjacency merging is only supported for bases up to 5, got base {0}")]
    PostMergeUnsupported(u64),
}

/// Fixed parameters of a grid.
///
/// Built with the builder-style constructors, then validated by
/// [`Grid::new`](crate::Grid::new) (or directly via [`GridConfig::validate`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Merge arity (number of equal tiles that fuse). Must be >= 2.
    pub base: u64,

    /// Edge length of the square grid. Must exceed `base`.
    pub size: usize,

    /// Enable the adjacency-merge pass. Only permitted for `base <= 5`.
    pub post_merge: bool,
}

impl GridConfig {
    /// Create a configuration with the adjacency-merge pass disabled.
    #[must_use]
    pub const fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            size,
            post_merge: false,
        }
    }

    /// Enable the adjacency-merge pass.
    #[must_use]
    pub const fn with_post_merge(mut self) -> Self {
        self.post_merge = true;
        self
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base <= 1 {
            return Err(ConfigError::InvalidBase(self.base));
        }
        if self.size as u64 <= self.base {
            return Err(ConfigError::InvalidSize {
                size: self.size,
                base: self.base,
            });
        }
        if self.post_merge && self.base > 5 {
            return Err(ConfigError::PostMergeUnsupported(self.base));
        }
        Ok(())
    }

    /// Number of tiles seeding a fresh board: one per unit of arity.
    #[must_use]
    pub const fn initial_tiles(&self) -> usize {
        self.base as usize
    }

    /// Total cell count of the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }
}
