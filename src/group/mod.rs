/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Process groups.
//!
//! The distributed layer of the closure computation is a fixed group of
//! cooperating processes with no shared mutable state; the only two
//! synchronization primitives the algorithm requires are a
//! [barrier](ProcessGroup::barrier) and an element-wise logical-OR
//! [all-reduce](ProcessGroup::all_reduce_or). Any message-passing layer with
//! these two collectives suffices, so they are abstracted by the
//! [`ProcessGroup`] trait.
//!
//! Three implementations are provided: [`Solo`], for a group of one,
//! [`LocalGroup`], which emulates a group of ranks with threads in a single
//! process, and, behind the `mpi` feature, [`MpiGroup`], which delegates to an
//! MPI world communicator.
//!
//! Both primitives are full-group rendezvous with no timeout: every rank must
//! invoke every collective the same number of times, in the same order, or
//! the group hangs. There is no detection and no recovery—the computation is
//! a one-shot batch and any divergence is fatal.

mod local;
pub use local::LocalGroup;

#[cfg(feature = "mpi")]
mod mpi;
#[cfg(feature = "mpi")]
pub use mpi::MpiGroup;

/// A fixed group of cooperating processes.
///
/// The membership of the group is fixed for the whole run: ranks are numbered
/// from 0 to [`num_ranks`](ProcessGroup::num_ranks) and rank 0 is the
/// coordinating process for reporting purposes.
pub trait ProcessGroup: Sync {
    /// Returns the rank of this process in the group.
    fn rank(&self) -> usize;

    /// Returns the number of processes in the group.
    fn num_ranks(&self) -> usize;

    /// Blocks until every process in the group has called this method.
    ///
    /// A pure rendezvous: no data is exchanged.
    fn barrier(&self);

    /// Combines the buffers of all processes element-wise with logical OR and
    /// returns the result to every process in `buf`.
    ///
    /// A single collective call: on return, `buf` is bit-identical on every
    /// rank. All ranks must pass buffers of the same length.
    fn all_reduce_or(&self, buf: &mut [bool]);
}

/// The trivial group of a single process.
///
/// The barrier and the reduction are no-ops, so the closure computation
/// degenerates to the shared-memory blocked algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solo;

impl ProcessGroup for Solo {
    #[inline(always)]
    fn rank(&self) -> usize {
        0
    }

    #[inline(always)]
    fn num_ranks(&self) -> usize {
        1
    }

    #[inline(always)]
    fn barrier(&self) {}

    #[inline(always)]
    fn all_reduce_or(&self, _buf: &mut [bool]) {}
}
