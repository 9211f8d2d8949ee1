/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Readers and writers for dense boolean matrices.
//!
//! Two input formats are supported:
//!
//! * *adjacency format*: one row per line, with `0`/`1` tokens separated by
//!   whitespace; the order of the matrix is the number of lines;
//! * *arcs format*: one arc per line, as two vertex ids separated by a
//!   configurable separator (a TAB by default); the order of the matrix is
//!   the maximum id plus one.
//!
//! Arcs are directed; to load an undirected graph, list each edge in both
//! directions.

use crate::matrix::BoolMatrix;
use anyhow::{bail, ensure, Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// The default separator for the arcs format.
pub const DEFAULT_SEPARATOR: char = '\t';

/// Reads a matrix in adjacency format.
pub fn read_adjacency(path: impl AsRef<Path>) -> Result<BoolMatrix> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut rows = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Could not read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| match token {
                "0" => Ok(false),
                "1" => Ok(true),
                _ => bail!(
                    "Invalid token {:?} at line {} of {}",
                    token,
                    line_num + 1,
                    path.display()
                ),
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    let n = rows.len();
    log::info!("{} has {} lines", path.display(), n);
    let mut matrix = BoolMatrix::new(n);
    for (i, row) in rows.iter().enumerate() {
        ensure!(
            row.len() == n,
            "Row {} of {} has {} columns, expected {}",
            i,
            path.display(),
            row.len(),
            n
        );
        for (j, &value) in row.iter().enumerate() {
            matrix.set(i, j, value);
        }
    }
    Ok(matrix)
}

/// Reads a matrix in arcs format.
///
/// The order of the matrix is the maximum vertex id plus one; an empty file
/// yields an empty matrix.
pub fn read_arcs(path: impl AsRef<Path>, separator: char) -> Result<BoolMatrix> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut arcs = Vec::new();
    let mut max_id = None;
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Could not read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let context = || format!("Invalid arc at line {} of {}", line_num + 1, path.display());
        let (source, target) = line.split_once(separator).with_context(context)?;
        let source = source.trim().parse::<usize>().with_context(context)?;
        let target = target.trim().parse::<usize>().with_context(context)?;
        max_id = Some(max_id.unwrap_or(0).max(source).max(target));
        arcs.push((source, target));
    }
    let n = max_id.map_or(0, |max_id| max_id + 1);
    log::info!(
        "Max id found in {}: building a {}x{} adjacency matrix from {} arcs",
        path.display(),
        n,
        n,
        arcs.len()
    );
    Ok(BoolMatrix::from_arcs(n, arcs))
}

/// Writes a matrix in adjacency format.
pub fn write_matrix(matrix: &BoolMatrix, writer: &mut impl Write) -> Result<()> {
    let n = matrix.order();
    let mut line = String::with_capacity(2 * n);
    for i in 0..n {
        line.clear();
        for (j, &value) in matrix.row(i).iter().enumerate() {
            if j != 0 {
                line.push(' ');
            }
            line.push(if value { '1' } else { '0' });
        }
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
