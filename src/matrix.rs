/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Dense boolean adjacency matrices.
//!
//! A [`BoolMatrix`] is a square boolean matrix stored row-major in a single
//! contiguous slice. Every process participating in a distributed closure
//! computation holds a full replica, so the order of the matrix is bounded by
//! the memory of the smallest participant; there is no sparse or out-of-core
//! representation.

/// A dense square boolean matrix, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolMatrix {
    n: usize,
    data: Box<[bool]>,
}

impl BoolMatrix {
    /// Creates an all-false matrix of the given order.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![false; n * n].into_boxed_slice(),
        }
    }

    /// Creates a matrix of the given order from a list of arcs.
    ///
    /// # Panics
    ///
    /// Panics if an arc endpoint is out of range.
    pub fn from_arcs(n: usize, arcs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut matrix = Self::new(n);
        for (u, v) in arcs {
            matrix.set(u, v, true);
        }
        matrix
    }

    /// Returns the order (number of rows and columns) of the matrix.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.n && col < self.n);
        self.data[row * self.n + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.n && col < self.n);
        self.data[row * self.n + col] = value;
    }

    /// Returns a row as a slice.
    #[inline(always)]
    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    /// Returns the underlying row-major slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Returns the underlying row-major slice, mutably.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Returns the number of true cells.
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&x| x).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_arcs() {
        let m = BoolMatrix::from_arcs(3, [(0, 1), (2, 0)]);
        assert!(m.get(0, 1));
        assert!(m.get(2, 0));
        assert!(!m.get(1, 2));
        assert_eq!(m.count_ones(), 2);
    }

    #[test]
    fn test_empty() {
        let m = BoolMatrix::new(0);
        assert_eq!(m.order(), 0);
        assert!(m.as_slice().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_arc() {
        BoolMatrix::from_arcs(2, [(0, 2)]);
    }
}
