/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly connected components of a closed matrix.
//!
//! Once the transitive closure *c* is available, components are immediate:
//! two distinct vertices *i* and *j* belong to the same strongly connected
//! component if and only if `c[i][j] && c[j][i]`, and mutual reachability is
//! transitive on a closed matrix, so a single quadratic pass suffices—no
//! visit of the graph is needed. Components are numbered in order of their
//! smallest vertex.
//!
//! The condensation of the closure (one node per component, one arc per
//! reachable ordered pair of distinct components) can be written in DOT
//! format for downstream graph tooling.

use crate::matrix::BoolMatrix;
use anyhow::Result;
use std::io::Write;

/// Strongly connected components.
///
/// An instance of this structure stores the [index of the
/// component](Sccs::components) of each vertex. Components are numbered from
/// 0 to [`num_components`](Sccs::num_components).
pub struct Sccs {
    num_components: usize,
    components: Box<[usize]>,
}

impl Sccs {
    pub fn new(num_components: usize, components: Box<[usize]>) -> Self {
        Sccs {
            num_components,
            components,
        }
    }

    /// Extracts the strongly connected components from a transitively closed
    /// matrix.
    ///
    /// The input must be a closure matrix (e.g., the output of
    /// [`closure::blocked`](crate::closure::blocked)); on a matrix that is
    /// not closed the result is meaningless.
    pub fn from_closure(closure: &BoolMatrix) -> Self {
        let n = closure.order();
        const UNASSIGNED: usize = usize::MAX;
        let mut components = vec![UNASSIGNED; n].into_boxed_slice();
        let mut num_components = 0;
        for i in 0..n {
            if components[i] != UNASSIGNED {
                continue;
            }
            components[i] = num_components;
            for j in i + 1..n {
                if components[j] == UNASSIGNED && closure.get(i, j) && closure.get(j, i) {
                    components[j] = num_components;
                }
            }
            num_components += 1;
        }
        Sccs {
            num_components,
            components,
        }
    }

    /// Returns the number of strongly connected components.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Returns a slice containing, for each vertex, the index of the
    /// component it belongs to.
    #[inline(always)]
    pub fn components(&self) -> &[usize] {
        &self.components
    }

    /// Returns the sizes of all components.
    pub fn compute_sizes(&self) -> Box<[usize]> {
        let mut sizes = vec![0; self.num_components()];
        for &component in self.components() {
            sizes[component] += 1;
        }
        sizes.into_boxed_slice()
    }

    /// Renumbers the components by decreasing size.
    ///
    /// After a call to this method, the sizes of the components will be
    /// decreasing in the component index. The method returns the sizes of
    /// the components after the renumbering.
    pub fn sort_by_size(&mut self) -> Box<[usize]> {
        let mut sizes = self.compute_sizes();
        debug_assert!(sizes.len() == self.num_components());
        let mut sort_perm = Vec::from_iter(0..sizes.len());
        sort_perm.sort_unstable_by(|&x, &y| sizes[y].cmp(&sizes[x]));
        let mut inv_perm = vec![0; sizes.len()];
        sort_perm
            .iter()
            .enumerate()
            .for_each(|(i, &x)| inv_perm[x] = i);
        self.components
            .iter_mut()
            .for_each(|component| *component = inv_perm[*component]);
        sizes.sort_by(|&x, &y| y.cmp(&x));
        sizes
    }

    /// Returns the adjacency matrix of the condensation: one vertex per
    /// component, with an arc between two distinct components whenever some
    /// vertex of the first reaches some vertex of the second in `closure`.
    pub fn condensation(&self, closure: &BoolMatrix) -> BoolMatrix {
        let n = closure.order();
        let mut condensation = BoolMatrix::new(self.num_components);
        for i in 0..n {
            for j in 0..n {
                if closure.get(i, j) && self.components[i] != self.components[j] {
                    condensation.set(self.components[i], self.components[j], true);
                }
            }
        }
        condensation
    }

    /// Writes the condensation of `closure` in DOT format.
    ///
    /// Each component becomes a node labeled with its vertices; each
    /// reachable ordered pair of distinct components becomes an arc.
    pub fn write_dot(&self, closure: &BoolMatrix, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "digraph closure {{")?;
        for component in 0..self.num_components {
            let members = self
                .components
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == component)
                .map(|(vertex, _)| vertex.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "\tc{} [label=\"{{{}}}\"];", component, members)?;
        }
        let condensation = self.condensation(closure);
        for source in 0..self.num_components {
            for target in 0..self.num_components {
                if condensation.get(source, target) {
                    writeln!(writer, "\tc{} -> c{};", source, target)?;
                }
            }
        }
        writeln!(writer, "}}")?;
        Ok(())
    }
}
