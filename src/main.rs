/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dsi_progress_logger::{no_logging, ProgressLog, ProgressLogger};
use graph_closure::group::{LocalGroup, ProcessGroup, Solo};
use graph_closure::ownership::DEFAULT_BLOCK_SIZE;
use graph_closure::sccs::Sccs;
use graph_closure::{closure, io, thread_pool};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// One matrix row per line, 0/1 tokens separated by whitespace.
    Adjacency,
    /// One arc per line, two vertex ids separated by the separator.
    Arcs,
}

#[derive(Parser, Debug)]
#[command(
    about = "Computes the transitive closure of a graph by parallel blocked Floyd-Warshall relaxation and prints it as an adjacency matrix.",
    version
)]
struct Args {
    /// The graph file.
    source: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Adjacency)]
    /// The format of the graph file.
    format: Format,

    #[arg(long, default_value_t = io::DEFAULT_SEPARATOR)]
    /// The separator between vertex ids in the arcs format.
    separator: char,

    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    /// The number of rows and columns per tile.
    block_size: usize,

    #[arg(short = 't', long, default_value_t = 0)]
    /// The number of threads per rank; 0 means all available cores.
    num_threads: usize,

    #[arg(short, long, default_value_t = 1)]
    /// The number of ranks of the process group, emulated by threads.
    ranks: usize,

    #[arg(long)]
    /// Write the condensation of the closure in DOT format to this path.
    dot: Option<PathBuf>,
}

pub fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;

    let args = Args::parse();

    let start = Instant::now();
    let a = match args.format {
        Format::Adjacency => io::read_adjacency(&args.source)?,
        Format::Arcs => io::read_arcs(&args.source, args.separator)?,
    };
    let init_time = start.elapsed();

    let num_threads = match args.num_threads {
        0 => num_cpus::get(),
        num_threads => num_threads,
    };
    log::info!(
        "Starting computation (n={}, ranks={}, threads per rank={})...",
        a.order(),
        args.ranks,
        num_threads
    );

    let start = Instant::now();
    let c = if args.ranks > 1 {
        LocalGroup::run(args.ranks, |group| {
            let thread_pool = thread_pool![num_threads];
            if group.rank() == 0 {
                let mut pl = ProgressLogger::default();
                pl.display_memory(true);
                closure::blocked(&a, group, &thread_pool, args.block_size, &mut pl)
            } else {
                closure::blocked(&a, group, &thread_pool, args.block_size, no_logging![])
            }
        })
        .into_iter()
        .next()
        .expect("The group returned no result")
    } else {
        let thread_pool = thread_pool![num_threads];
        let mut pl = ProgressLogger::default();
        pl.display_memory(true);
        closure::blocked(&a, &Solo, &thread_pool, args.block_size, &mut pl)
    };
    let compute_time = start.elapsed();

    let stdout = std::io::stdout().lock();
    io::write_matrix(&c, &mut BufWriter::new(stdout))?;

    let mut sccs = Sccs::from_closure(&c);
    let sizes = sccs.sort_by_size();
    log::info!(
        "{} strongly connected components (largest: {})",
        sccs.num_components(),
        sizes.first().copied().unwrap_or(0)
    );
    if let Some(dot) = &args.dot {
        let file = std::fs::File::create(dot)
            .with_context(|| format!("Could not create {}", dot.display()))?;
        sccs.write_dot(&c, &mut BufWriter::new(file))?;
        log::info!("Condensation written to {}", dot.display());
    }

    log::info!("Init: {:.3?}, Compute: {:.3?}", init_time, compute_time);

    Ok(())
}
