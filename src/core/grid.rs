//! The grid engine: tile spawning, directional moves, adjacency merging,
//! and terminal-state detection.
//!
//! All four moves are expressed through a single leftward slide
//! (compress -> merge -> compress per row), with the other directions
//! obtained by reflecting or transposing the buffer around it. Each
//! transform step produces one owned buffer; the result is compared
//! cell-for-cell against the previous state to decide move validity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{ConfigError, GridConfig};
use super::line;
use super::rng::SpawnRng;

/// A direction to slide/merge tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A cell position, row-major from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Neighbor offsets for the adjacency-merge pass, in fixed scan order:
/// above, left, below, right. Candidate selection is positional - the first
/// `base - 1` equal neighbors in this order win.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// An N x N grid of tiles with a score and a spawn RNG.
///
/// Every non-zero cell holds `base^k` for some `k >= 1`; 0 means empty.
/// The invariant is established by spawning (which places `base` or
/// `base^2`) and preserved by merging (`base` tiles of `base^k` fuse into
/// one tile of `base^(k+1)`).
#[derive(Clone, Debug)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<u64>,
    score: u64,
    rng: SpawnRng,
}

impl Grid {
    /// Create an empty grid, then seed it with the configured number of
    /// initial tiles.
    ///
    /// ```
    /// use fusegrid::{Grid, GridConfig, SpawnRng};
    ///
    /// let grid = Grid::new(GridConfig::new(2, 4), SpawnRng::new(42)).unwrap();
    /// assert_eq!(grid.score(), 0);
    /// assert_eq!(grid.cells().iter().filter(|&&v| v != 0).count(), 2);
    /// ```
    pub fn new(config: GridConfig, rng: SpawnRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid = Self {
            cells: vec![0; config.cell_count()],
            score: 0,
            rng,
            config,
        };
        for _ in 0..grid.config.initial_tiles() {
            grid.spawn_tile();
        }
        Ok(grid)
    }

    /// Assemble a grid from already-validated parts.
    ///
    /// Scenario loading in [`crate::core::state`] performs the validation.
    pub(crate) fn from_parts(
        config: GridConfig,
        cells: Vec<u64>,
        score: u64,
        rng: SpawnRng,
    ) -> Self {
        Self {
            config,
            cells,
            score,
            rng,
        }
    }

    /// The fixed configuration of this grid.
    #[must_use]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Merge arity.
    #[must_use]
    pub fn base(&self) -> u64 {
        self.config.base
    }

    /// Edge length of the square grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Whether the adjacency-merge pass is enabled.
    #[must_use]
    pub fn post_merge(&self) -> bool {
        self.config.post_merge
    }

    /// Current score. Monotonically non-decreasing.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Read-only view of the cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Value at a cell (0 = empty).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        assert!(row < self.config.size && col < self.config.size);
        self.cells[row * self.config.size + col]
    }

    /// Number of empty cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Place a new tile in a uniformly random empty cell: `base` with
    /// probability 0.9, `base^2` otherwise.
    ///
    /// Returns the coordinate of the spawned tile, or `None` if the board
    /// is full.
    pub fn spawn_tile(&mut self) -> Option<Coord> {
        let empty: Vec<usize> = (0..self.cells.len())
            .filter(|&i| self.cells[i] == 0)
            .collect();
        if empty.is_empty() {
            return None;
        }

        let idx = empty[self.rng.gen_range_usize(0..empty.len())];
        let base = self.config.base;
        self.cells[idx] = if self.rng.gen_bool(0.9) {
            base
        } else {
            base * base
        };
        Some(Coord::new(idx / self.config.size, idx % self.config.size))
    }

    /// Slide and merge tiles in the given direction.
    ///
    /// Returns `false` iff the resulting grid is cell-for-cell identical to
    /// the previous state (an invalid move). The new buffer is committed
    /// either way; rejected moves simply commit an identical one.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let size = self.config.size;
        let base = self.config.base;

        let (next, gained) = match direction {
            Direction::Left => slide_left(&self.cells, size, base),
            Direction::Right => {
                let flipped = reverse_rows(&self.cells, size);
                let (slid, gained) = slide_left(&flipped, size, base);
                (reverse_rows(&slid, size), gained)
            }
            Direction::Up => {
                let turned = transpose(&self.cells, size);
                let (slid, gained) = slide_left(&turned, size, base);
                (transpose(&slid, size), gained)
            }
            Direction::Down => {
                let turned = reverse_rows(&transpose(&self.cells, size), size);
                let (slid, gained) = slide_left(&turned, size, base);
                (transpose(&reverse_rows(&slid, size), size), gained)
            }
        };

        let changed = next != self.cells;
        self.cells = next;
        self.score += gained;
        changed
    }

    /// One adjacency-merge pass over the whole board.
    ///
    /// Scans cells row-major. For each non-zero cell, equal-valued orthogonal
    /// neighbors are collected in the fixed order above/left/below/right; as
    /// soon as `base - 1` candidates exist, the cell fuses (value times
    /// `base`, score credited, exactly those neighbors zeroed) and the scan
    /// moves on to the next cell. Merges are visible to later cells within
    /// the same pass.
    ///
    /// Returns whether any merge occurred. A single pass can create new
    /// adjacencies, so callers iterate until it reports `false`; the board
    /// total never decreases and strictly fewer tiles remain after each
    /// merging pass, so the fixed point is always reached.
    pub fn adjacency_merge_pass(&mut self) -> bool {
        let size = self.config.size;
        let arity = self.config.base as usize;
        let mut merged_any = false;

        for row in 0..size {
            for col in 0..size {
                let value = self.cells[row * size + col];
                if value == 0 {
                    continue;
                }

                let mut candidates: Vec<usize> = Vec::with_capacity(arity - 1);
                for (dr, dc) in NEIGHBOR_OFFSETS {
                    let (nr, nc) = (row as isize + dr, col as isize + dc);
                    if nr < 0 || nc < 0 || nr as usize >= size || nc as usize >= size {
                        continue;
                    }
                    let nidx = nr as usize * size + nc as usize;
                    if self.cells[nidx] == value {
                        candidates.push(nidx);
                        if candidates.len() == arity - 1 {
                            self.cells[row * size + col] = value * self.config.base;
                            self.score += value * self.config.base;
                            for &c in &candidates {
                                self.cells[c] = 0;
                            }
                            merged_any = true;
                            break;
                        }
                    }
                }
            }
        }

        merged_any
    }

    /// Whether any move could still change the board.
    ///
    /// True if any cell is empty, or if any axis-aligned run of `base`
    /// consecutive equal cells exists along a row or column (overlapping
    /// runs allowed). False only on a full board with no such run - the
    /// terminal state. Equivalent to speculatively trying all four moves,
    /// but cheaper.
    #[must_use]
    pub fn can_move(&self) -> bool {
        let size = self.config.size;
        let arity = self.config.base as usize;

        for row in 0..size {
            for col in 0..size {
                let value = self.cells[row * size + col];
                if value == 0 {
                    return true;
                }

                // Vertical run starting here.
                if row + arity <= size
                    && (1..arity).all(|i| self.cells[(row + i) * size + col] == value)
                {
                    return true;
                }

                // Horizontal run starting here.
                if col + arity <= size
                    && (1..arity).all(|j| self.cells[row * size + col + j] == value)
                {
                    return true;
                }
            }
        }

        false
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for row in self.cells.chunks_exact(self.config.size) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:<5}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Slide every row leftward: compress, merge runs, compress again to close
/// the holes merging opened. Returns the new buffer and the score gained.
fn slide_left(cells: &[u64], size: usize, base: u64) -> (Vec<u64>, u64) {
    let mut next = Vec::with_capacity(cells.len());
    let mut gained = 0;

    for row in cells.chunks_exact(size) {
        let mut packed = line::compress(row);
        gained += line::merge_run(&mut packed, base);
        next.extend_from_slice(&line::compress(&packed));
    }

    (next, gained)
}

/// Mirror every row, turning a leftward slide into a rightward one.
fn reverse_rows(cells: &[u64], size: usize) -> Vec<u64> {
    let mut out = Vec::with_capacity(cells.len());
    for row in cells.chunks_exact(size) {
        out.extend(row.iter().rev().copied());
    }
    out
}

/// Transpose the square buffer, turning column slides into row slides.
fn transpose(cells: &[u64], size: usize) -> Vec<u64> {
    let mut out = vec![0; cells.len()];
    for row in 0..size {
        for col in 0..size {
            out[col * size + row] = cells[row * size + col];
        }
    }
    out
}
