//! Pure row transforms: compress and merge.
//!
//! Every directional move reduces to these two functions applied per row;
//! columns go through the same code via transposition. Both operate on a
//! single owned buffer with no aliasing between old and new state.

use smallvec::SmallVec;

/// One row of tiles. Inlined up to 8 cells, which covers typical grid sizes
/// without heap allocation.
pub type Line = SmallVec<[u64; 8]>;

/// Left-justify the non-zero entries of a row, zero-padding to the input
/// length.
///
/// Pure and idempotent: `compress(compress(row)) == compress(row)`, and the
/// relative order of non-zero entries is preserved.
#[must_use]
pub fn compress(row: &[u64]) -> Line {
    let mut out: Line = row.iter().copied().filter(|&v| v != 0).collect();
    out.resize(row.len(), 0);
    out
}

/// Merge full runs of `base` equal tiles in a single left-to-right sweep.
///
/// At each position holding a non-zero value, if the next `base - 1` cells
/// all hold the same value, the run fuses: the leading cell becomes
/// `value * base` and the rest are zeroed. The sweep continues past the
/// zeroed cells, so the zeros left behind separate a freshly merged tile
/// from anything that could re-merge it in the same sweep. Runs shorter
/// than `base` never merge.
///
/// Returns the score gained: the sum of all tile values produced.
pub fn merge_run(row: &mut [u64], base: u64) -> u64 {
    let arity = base as usize;
    if row.len() < arity {
        return 0;
    }

    let mut gained = 0;
    for i in 0..=(row.len() - arity) {
        let value = row[i];
        if value == 0 {
            continue;
        }
        if row[i + 1..i + arity].iter().all(|&v| v == value) {
            row[i] = value * base;
            gained += row[i];
            for cell in &mut row[i + 1..i + arity] {
                *cell = 0;
            }
        }
    }
    gained
}
