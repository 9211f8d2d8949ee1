/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use graph_closure::ownership::BlockCyclic;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_partition() {
    // The owned rows of all ranks must partition [0, n) exactly, for any
    // combination of order, block size, and number of ranks.
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..100 {
        let n = rng.random_range(0..200);
        let block_size = rng.random_range(1..20);
        let num_ranks = rng.random_range(1..10);
        let map = BlockCyclic::new(block_size, num_ranks);
        let mut count = vec![0; n];
        for rank in 0..num_ranks {
            for row in map.rows(n, rank) {
                assert!(row < n);
                assert_eq!(map.owner(row), rank);
                count[row] += 1;
            }
        }
        assert!(
            count.iter().all(|&c| c == 1),
            "n={}, block_size={}, num_ranks={}",
            n,
            block_size,
            num_ranks
        );
    }
}

#[test]
fn test_tile_starts_are_aligned() {
    let map = BlockCyclic::new(5, 3);
    for rank in 0..3 {
        for start in map.tile_starts(1000, rank) {
            assert_eq!(start % 5, 0);
            assert_eq!((start / 5) % 3, rank);
        }
    }
}

#[test]
fn test_rows_are_ordered() {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..20 {
        let n = rng.random_range(0..100);
        let map = BlockCyclic::new(rng.random_range(1..8), rng.random_range(1..5));
        for rank in 0..map.num_ranks() {
            let rows = map.rows(n, rank).collect::<Vec<_>>();
            assert!(rows.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn test_single_rank_owns_everything() {
    let map = BlockCyclic::new(7, 1);
    assert_eq!(map.rows(23, 0).collect::<Vec<_>>(), (0..23).collect::<Vec<_>>());
}
