/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use graph_closure::io::{read_adjacency, read_arcs, write_matrix, DEFAULT_SEPARATOR};
use graph_closure::matrix::BoolMatrix;
use std::io::Write;

fn temp_file(content: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_read_adjacency() -> Result<()> {
    let file = temp_file("0 1 0\n0 0 1\n1 0 0\n")?;
    let matrix = read_adjacency(file.path())?;
    assert_eq!(matrix, BoolMatrix::from_arcs(3, [(0, 1), (1, 2), (2, 0)]));
    Ok(())
}

#[test]
fn test_read_adjacency_rejects_bad_token() -> Result<()> {
    let file = temp_file("0 2\n0 0\n")?;
    assert!(read_adjacency(file.path()).is_err());
    Ok(())
}

#[test]
fn test_read_adjacency_rejects_ragged_rows() -> Result<()> {
    let file = temp_file("0 1\n0\n")?;
    assert!(read_adjacency(file.path()).is_err());
    Ok(())
}

#[test]
fn test_read_arcs() -> Result<()> {
    // The order is the maximum id plus one, so vertex 4 exists even though
    // no arc touches 3.
    let file = temp_file("0\t1\n1\t2\n2\t4\n")?;
    let matrix = read_arcs(file.path(), DEFAULT_SEPARATOR)?;
    assert_eq!(matrix.order(), 5);
    assert_eq!(matrix, BoolMatrix::from_arcs(5, [(0, 1), (1, 2), (2, 4)]));
    Ok(())
}

#[test]
fn test_read_arcs_custom_separator() -> Result<()> {
    let file = temp_file("0,1\n1,0\n")?;
    let matrix = read_arcs(file.path(), ',')?;
    assert_eq!(matrix, BoolMatrix::from_arcs(2, [(0, 1), (1, 0)]));
    Ok(())
}

#[test]
fn test_read_arcs_empty_file() -> Result<()> {
    let file = temp_file("")?;
    assert_eq!(read_arcs(file.path(), DEFAULT_SEPARATOR)?.order(), 0);
    Ok(())
}

#[test]
fn test_read_arcs_rejects_garbage() -> Result<()> {
    let file = temp_file("0\tx\n")?;
    assert!(read_arcs(file.path(), DEFAULT_SEPARATOR).is_err());
    Ok(())
}

#[test]
fn test_write_matrix() -> Result<()> {
    let matrix = BoolMatrix::from_arcs(3, [(0, 1), (2, 2)]);
    let mut output = Vec::new();
    write_matrix(&matrix, &mut output)?;
    assert_eq!(String::from_utf8(output)?, "0 1 0\n0 0 0\n0 0 1\n");
    Ok(())
}
