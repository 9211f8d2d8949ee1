/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::group::ProcessGroup;
use anyhow::{Context, Result};
use mpi::collective::SystemOperation;
use mpi::environment::Universe;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

/// A process group backed by the MPI world communicator.
///
/// Each rank runs in its own MPI process: the barrier maps to `MPI_Barrier`
/// and the reduction to a single `MPI_Allreduce` with logical OR. Create one
/// group per process, early in `main`, and keep it alive for the whole run:
/// dropping it finalizes MPI.
pub struct MpiGroup {
    // Dropping the universe finalizes MPI, so it must outlive the world
    // communicator.
    _universe: Universe,
    world: SimpleCommunicator,
    rank: usize,
    num_ranks: usize,
}

impl MpiGroup {
    /// Initializes MPI and returns the world group.
    ///
    /// Fails if MPI has already been initialized in this process.
    pub fn new() -> Result<Self> {
        let universe = mpi::initialize().context("Could not initialize MPI")?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let num_ranks = world.size() as usize;
        Ok(Self {
            _universe: universe,
            world,
            rank,
            num_ranks,
        })
    }
}

impl ProcessGroup for MpiGroup {
    #[inline(always)]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline(always)]
    fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    fn barrier(&self) {
        self.world.barrier();
    }

    fn all_reduce_or(&self, buf: &mut [bool]) {
        let local = buf.to_vec();
        self.world
            .all_reduce_into(&local[..], buf, &SystemOperation::logical_or());
    }
}
