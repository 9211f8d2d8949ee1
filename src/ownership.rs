/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Block-cyclic row ownership.
//!
//! The rows of the matrix are grouped in tiles of [`block_size`
//! rows](BlockCyclic::block_size) and tiles are assigned to ranks round-robin:
//! rank *r* owns the tiles starting at rows *rB*, (*r* + *p*)*B*,
//! (*r* + 2*p*)*B*, and so on, where *B* is the block size and *p* the number
//! of ranks. For every matrix order the owned rows of all ranks partition the
//! row range exactly, with no overlaps and no gaps.
//!
//! During the relaxation sweep a rank writes only the rows it owns; this is
//! what makes the intra-process hot loop lock-free.

/// The default number of rows and columns per tile.
///
/// Tiles of this size give good cache behavior on dense matrices of a few
/// thousand rows; the value is a tuning knob, not a correctness parameter.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// A block-cyclic assignment of row tiles to ranks.
///
/// The map is a pure function of its three parameters; it holds no state
/// beyond them and can be freely copied across threads and processes.
#[derive(Clone, Copy, Debug)]
pub struct BlockCyclic {
    block_size: usize,
    num_ranks: usize,
}

impl BlockCyclic {
    /// Creates a new ownership map.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` or `num_ranks` is zero.
    pub fn new(block_size: usize, num_ranks: usize) -> Self {
        assert!(block_size > 0, "the block size must be positive");
        assert!(num_ranks > 0, "the number of ranks must be positive");
        Self {
            block_size,
            num_ranks,
        }
    }

    /// Returns the block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the number of ranks.
    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    /// Returns the rank owning the given row.
    #[inline(always)]
    pub fn owner(&self, row: usize) -> usize {
        (row / self.block_size) % self.num_ranks
    }

    /// Returns the ordered starting rows of the tiles owned by `rank` in a
    /// matrix of the given order.
    ///
    /// The last tile may be clipped at `n`.
    pub fn tile_starts(&self, n: usize, rank: usize) -> impl Iterator<Item = usize> {
        assert!(rank < self.num_ranks);
        (rank * self.block_size..n).step_by(self.num_ranks * self.block_size)
    }

    /// Returns the ordered rows owned by `rank` in a matrix of the given
    /// order.
    pub fn rows(&self, n: usize, rank: usize) -> impl Iterator<Item = usize> {
        let block_size = self.block_size;
        self.tile_starts(n, rank)
            .flat_map(move |start| start..(start + block_size).min(n))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_owner_matches_rows() {
        let map = BlockCyclic::new(3, 4);
        for rank in 0..4 {
            for row in map.rows(100, rank) {
                assert_eq!(map.owner(row), rank);
            }
        }
    }

    #[test]
    fn test_clipped_tile() {
        // n = 7, B = 3, 2 ranks: tiles [0, 3) and [6, 7) to rank 0,
        // [3, 6) to rank 1.
        let map = BlockCyclic::new(3, 2);
        assert_eq!(map.rows(7, 0).collect::<Vec<_>>(), vec![0, 1, 2, 6]);
        assert_eq!(map.rows(7, 1).collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_more_ranks_than_tiles() {
        let map = BlockCyclic::new(10, 4);
        assert_eq!(map.rows(5, 0).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        for rank in 1..4 {
            assert_eq!(map.rows(5, rank).count(), 0);
        }
    }
}
