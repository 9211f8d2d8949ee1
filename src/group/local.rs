/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::group::ProcessGroup;
use std::sync::{Barrier, Mutex};

/// A process group emulated by threads in a single process.
///
/// [`LocalGroup::run`] spawns one scoped thread per rank and hands each of
/// them a [`LocalGroup`] handle; the handles rendezvous on a shared
/// [`Barrier`] and reduce through a shared accumulator. Every rank still
/// works on its own replica of the data, exactly as separate processes
/// would, so this backend is suitable both for testing the distributed
/// algorithm and for running it on a single machine.
///
/// # Examples
///
/// ```
/// use graph_closure::group::{LocalGroup, ProcessGroup};
///
/// let unions = LocalGroup::run(2, |group| {
///     let mut buf = vec![false; 2];
///     buf[group.rank()] = true;
///     group.all_reduce_or(&mut buf);
///     buf
/// });
///
/// // Every rank sees the union of all contributions.
/// assert_eq!(unions, vec![vec![true, true]; 2]);
/// ```
pub struct LocalGroup<'a> {
    rank: usize,
    num_ranks: usize,
    shared: &'a Shared,
}

struct Shared {
    barrier: Barrier,
    accum: Mutex<Vec<bool>>,
}

impl LocalGroup<'_> {
    /// Runs `f` on `num_ranks` threads, one per rank, and returns the results
    /// in rank order.
    ///
    /// # Panics
    ///
    /// Panics if `num_ranks` is zero, or if a rank panics.
    pub fn run<T: Send>(num_ranks: usize, f: impl Fn(&LocalGroup) -> T + Sync) -> Vec<T> {
        assert!(num_ranks > 0, "the number of ranks must be positive");
        let shared = Shared {
            barrier: Barrier::new(num_ranks),
            accum: Mutex::new(Vec::new()),
        };
        std::thread::scope(|scope| {
            let handles = (0..num_ranks)
                .map(|rank| {
                    let shared = &shared;
                    let f = &f;
                    scope.spawn(move || {
                        f(&LocalGroup {
                            rank,
                            num_ranks,
                            shared,
                        })
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("A rank panicked"))
                .collect()
        })
    }
}

impl ProcessGroup for LocalGroup<'_> {
    #[inline(always)]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline(always)]
    fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    fn barrier(&self) {
        self.shared.barrier.wait();
    }

    fn all_reduce_or(&self, buf: &mut [bool]) {
        // Accumulation phase: the first rank to arrive seeds the accumulator,
        // the others OR their buffer into it.
        {
            let mut accum = self.shared.accum.lock().unwrap();
            if accum.is_empty() {
                accum.extend_from_slice(buf);
            } else {
                assert_eq!(
                    accum.len(),
                    buf.len(),
                    "Mismatched buffer lengths in collective reduction"
                );
                for (acc, &value) in accum.iter_mut().zip(buf.iter()) {
                    *acc |= value;
                }
            }
        }
        self.shared.barrier.wait();
        // Distribution phase: every rank copies the union back.
        buf.copy_from_slice(&self.shared.accum.lock().unwrap());
        let leader = self.shared.barrier.wait().is_leader();
        if leader {
            self.shared.accum.lock().unwrap().clear();
        }
        // The accumulator must be empty again before any rank can enter the
        // next reduction.
        self.shared.barrier.wait();
    }
}
