/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Parallel blocked Floyd–Warshall transitive closure.
//!
//! The closure of an adjacency matrix *a* is computed by boolean
//! Floyd–Warshall relaxation: for every waypoint *k* in increasing order,
//! `c[i][j] |= c[i][k] && c[k][j]`. The [blocked](blocked) implementation
//! groups waypoints in blocks of *B* consecutive indices and tiles the row
//! and column ranges with the same block size, which turns the inner loops
//! into cache-friendly passes over *B* × *B* tiles. Blocking is purely a
//! locality optimization: the result is identical to the one of the
//! [sequential triple loop](sequential), bit for bit.
//!
//! # Distribution
//!
//! Work is distributed at two levels:
//!
//! * across a [process group](crate::group::ProcessGroup), by assigning row
//!   tiles to ranks [block-cyclically](crate::ownership::BlockCyclic): a rank
//!   writes only the rows it owns, and every rank holds a full replica of the
//!   closure matrix;
//! * inside each process, across a fixed-size [thread pool](rayon::ThreadPool):
//!   the owned tiles of the current waypoint block are claimed dynamically by
//!   the pool workers through a shared atomic cursor, so a slow tile cannot
//!   serialize the rest of the pool behind a static schedule.
//!
//! # Synchronization discipline
//!
//! At waypoint block *kb* every update reads the *pivot rows*
//! `c[k][·]`, *k* ∈ [*kb*, *kb* + *B*), which belong to a single rank. A
//! barrier at the end of each block keeps the ranks in lockstep, but it moves
//! no data, so on its own it would leave every other rank reading its initial,
//! unrelaxed copy of the pivot rows and the sweep would miss paths that chain
//! two waypoints of the same block through a row the reader does not own (for
//! instance, with arcs 0 → 4, 4 → 5, 5 → 1 and the waypoints 4 and 5 in one
//! block, the arc 4 → 1 is discovered in row 4 too late for row 0 to use it).
//! Each block therefore proceeds in three phases:
//!
//! 1. the owner of the pivot rows relaxes them through the waypoints of the
//!    block, in increasing order;
//! 2. a logical-OR all-reduce of the pivot panel distributes the fresh rows
//!    to the whole group (the stale copies are subsets, so the union is
//!    exactly the owner's panel);
//! 3. every rank relaxes the row tiles it owns through the waypoints of the
//!    block, with the waypoint loop outermost, and the group rendezvouses on
//!    the barrier before moving to the next block.
//!
//! During phase 3 the pivot rows are read-only—the owner skips the pivot
//! tile, which is already at its fixpoint for this block—and every other row
//! is written by the single worker that claimed its tile, so the hot loop
//! needs no locks.
//!
//! After the last block, rows are complete on their owners and possibly stale
//! everywhere else; a final full-matrix logical-OR all-reduce leaves the
//! complete closure, bit-identical, on every rank. Cells only ever go from
//! false to true, which is what makes OR-merging of replicas sound.

use crate::group::ProcessGroup;
use crate::matrix::BoolMatrix;
use crate::ownership::BlockCyclic;
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use sync_cell_slice::{SyncCell, SyncSlice};

/// Computes the transitive closure of `a` by the sequential unblocked triple
/// loop.
///
/// This is the reference implementation: it performs no allocation beyond the
/// result matrix and serves as the oracle for the parallel version.
pub fn sequential(a: &BoolMatrix) -> BoolMatrix {
    let n = a.order();
    let mut c = a.clone();
    let data = c.as_mut_slice();
    for k in 0..n {
        for i in 0..n {
            if !data[i * n + k] {
                continue;
            }
            for j in 0..n {
                if data[k * n + j] && !data[i * n + j] {
                    data[i * n + j] = true;
                }
            }
        }
    }
    c
}

/// Computes the transitive closure of `a` with the parallel blocked sweep
/// described in the [module documentation](self).
///
/// Every rank of `group` must call this function with the same matrix, block
/// size, and call order; the result is bit-identical on every rank and equal
/// to the output of [`sequential`]. The intra-process work is fanned out on
/// `thread_pool`, whose size is independent of the number of owned rows.
///
/// Pass [`no_logging![]`](dsi_progress_logger::no_logging) as `pl` to disable
/// progress reporting; the conventional choice is to log on rank 0 only.
///
/// # Panics
///
/// Panics if `block_size` is zero.
pub fn blocked(
    a: &BoolMatrix,
    group: &impl ProcessGroup,
    thread_pool: &rayon::ThreadPool,
    block_size: usize,
    pl: &mut impl ProgressLog,
) -> BoolMatrix {
    let n = a.order();
    let rank = group.rank();
    let ownership = BlockCyclic::new(block_size, group.num_ranks());
    let tiles = ownership.tile_starts(n, rank).collect::<Vec<_>>();

    // Copy the adjacency matrix into the closure matrix, splitting the cell
    // range evenly across the pool workers; ownership is irrelevant here.
    let mut c = BoolMatrix::new(n);
    let num_threads = thread_pool.current_num_threads().max(1);
    let chunk_size = (n * n).div_ceil(num_threads).max(1);
    thread_pool.install(|| {
        c.as_mut_slice()
            .par_chunks_mut(chunk_size)
            .zip(a.as_slice().par_chunks(chunk_size))
            .for_each(|(dst, src)| dst.copy_from_slice(src));
    });

    let num_blocks = n.div_ceil(block_size);
    pl.item_name("block");
    pl.expected_updates(Some(num_blocks));
    pl.start(format!(
        "Relaxing {} waypoint blocks on {} ranks...",
        num_blocks,
        group.num_ranks()
    ));

    for kb in (0..n).step_by(block_size) {
        let kb_end = (kb + block_size).min(n);

        // Phase 1: the owner brings the pivot rows up to date through the
        // waypoints of this block.
        if ownership.owner(kb) == rank {
            relax_pivot_panel(c.as_mut_slice(), n, kb, kb_end);
        }

        // Phase 2: distribute the fresh pivot panel. The other ranks hold
        // stale subsets of it, so the union is the owner's panel.
        group.all_reduce_or(&mut c.as_mut_slice()[kb * n..kb_end * n]);

        // Phase 3: relax the owned tiles, each claimed by one pool worker.
        {
            let c_sync = c.as_mut_slice().as_sync_slice();
            let cursor = AtomicUsize::new(0);
            thread_pool.broadcast(|_| loop {
                let t = cursor.fetch_add(1, Ordering::Relaxed);
                if t >= tiles.len() {
                    break;
                }
                let ib = tiles[t];
                if ib == kb {
                    // The pivot tile is already at its fixpoint.
                    continue;
                }
                relax_tile(c_sync, n, ib, kb, kb_end, block_size);
            });
        }

        group.barrier();
        pl.update();
    }

    pl.done();

    // Merge the replicas: every row is complete on its owner and the stale
    // copies are subsets, so the element-wise union is the closure.
    group.all_reduce_or(c.as_mut_slice());
    c
}

/// Relaxes the pivot rows `[kb, kb_end)` through the waypoints
/// `[kb, kb_end)`, in increasing waypoint order.
fn relax_pivot_panel(c: &mut [bool], n: usize, kb: usize, kb_end: usize) {
    for k in kb..kb_end {
        for i in kb..kb_end {
            if i == k || !c[i * n + k] {
                continue;
            }
            for j in 0..n {
                if c[k * n + j] && !c[i * n + j] {
                    c[i * n + j] = true;
                }
            }
        }
    }
}

/// Relaxes the row tile starting at `ib` through the waypoints
/// `[kb, kb_end)`, sweeping the columns in tiles of `block_size`.
///
/// The waypoint loop must be outermost: when waypoint `k` is used, column `k`
/// of the tile rows must already reflect the waypoints below `k`, which the
/// full column sweep of the previous waypoint guarantees.
fn relax_tile(
    c: &[SyncCell<bool>],
    n: usize,
    ib: usize,
    kb: usize,
    kb_end: usize,
    block_size: usize,
) {
    let ib_end = (ib + block_size).min(n);
    for k in kb..kb_end {
        for jb in (0..n).step_by(block_size) {
            let jb_end = (jb + block_size).min(n);
            for i in ib..ib_end {
                // SAFETY: tiles never overlap and each is claimed by exactly
                // one worker, so the rows [ib, ib_end) are written by this
                // worker only; the pivot rows read here are not written
                // during this phase.
                unsafe {
                    if !c[i * n + k].get() {
                        continue;
                    }
                    for j in jb..jb_end {
                        if c[k * n + j].get() && !c[i * n + j].get() {
                            c[i * n + j].set(true);
                        }
                    }
                }
            }
        }
    }
}
