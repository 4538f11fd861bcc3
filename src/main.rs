#![warn(rust_2018_idioms)]

//! Exact k-coloring of simple undirected graphs: a DSATUR-ordered
//! backtracking core behind a fast-path cascade, run serially, on
//! a thread pool or on a master/worker rank cluster, plus graph
//! generators and a benchmark mode around it.

mod comm;
mod debug;
mod generate;
mod graph;
mod input;
mod parser;
mod solver;
mod statistics;

pub use debug::Error;

use graph::verify_coloring;
use input::{read_graph, read_settings, write_graph, Settings};
use solver::solve;
use statistics::run_bench;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<(), Error> {
    match read_settings()? {
        Settings::Solve {
            graph: path,
            one_based,
            k,
            strategy,
            max_seconds,
        } => {
            let graph = read_graph(&path, one_based)?;
            let result = solve(&graph, k, &strategy, max_seconds)?;

            println!(
                "success={} time={:.10}s nodes={} backtracks={}",
                result.success, result.seconds, result.nodes, result.backtracks
            );
            if result.success {
                let verdict = if verify_coloring(&graph, &result.color, k) {
                    "OK"
                } else {
                    "FAIL"
                };
                println!("verify={}", verdict);
            }
        }
        Settings::Generate { spec, out } => {
            let graph = generate::build(spec)?;
            write_graph(&out, &graph, false)?;
            println!(
                "Wrote {} n={} m={}",
                out.display(),
                graph.size(),
                graph.number_edges()
            );
        }
        Settings::Bench {
            graph: path,
            one_based,
            k,
            strategy,
            runs,
            max_seconds,
        } => {
            let graph = read_graph(&path, one_based)?;
            let stdout = std::io::stdout();
            run_bench(&graph, k, &strategy, runs, max_seconds, &mut stdout.lock())?;
        }
    }

    Ok(())
}
