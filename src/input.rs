//! Command line surface: options, their validation into
//! settings, and edge-list file reading and writing.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use structopt::StructOpt;

use crate::{
    debug::ModeError,
    generate::GenSpec,
    graph::Graph,
    parser::parse_edge_list,
    solver::Strategy,
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Serial,
    Threads,
    Distributed,
    Generate,
    Bench,
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(Self::Serial),
            "threads" => Ok(Self::Threads),
            "mpi" | "dist" => Ok(Self::Distributed),
            "gen" => Ok(Self::Generate),
            "bench" => Ok(Self::Bench),
            _ => Err(ModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenType {
    Complete,
    Cycle,
    Grid,
    Random,
    Bipartite,
}

impl FromStr for GenType {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(Self::Complete),
            "cycle" => Ok(Self::Cycle),
            "grid" => Ok(Self::Grid),
            "random" => Ok(Self::Random),
            "bipartite" => Ok(Self::Bipartite),
            _ => Err(ModeError(s.to_string())),
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = "tinct", about = "Exact k-coloring of simple undirected graphs.")]
struct CommandLineOptions {
    /// Execution mode: serial, threads, mpi, gen or bench.
    #[structopt(long, default_value = "serial")]
    mode: Mode,
    /// Path of the edge-list graph file to color.
    #[structopt(long, parse(from_os_str))]
    graph: Option<PathBuf>,
    /// Size of the color palette.
    #[structopt(long)]
    k: Option<usize>,
    /// Vertices in the graph file are numbered from 1 instead of 0.
    #[structopt(long = "one_based", default_value = "0")]
    one_based: u8,
    /// Worker threads for the threaded strategy.
    #[structopt(long)]
    threads: Option<usize>,
    /// Ranks (master included) for the distributed strategy.
    #[structopt(long)]
    procs: Option<usize>,
    /// Depth of the shared search prefix handed out as sub-problems.
    #[structopt(long, default_value = "5")]
    split: usize,
    /// Wall-clock budget in seconds; 0 disables the budget.
    #[structopt(long = "max_sec", default_value = "0")]
    max_sec: f64,
    /// Generator family: complete, cycle, grid, random or bipartite.
    #[structopt(long = "type")]
    gen_type: Option<GenType>,
    /// Vertex count for the complete, cycle and random generators.
    #[structopt(long)]
    n: Option<usize>,
    /// Row count for the grid generator.
    #[structopt(long)]
    rows: Option<usize>,
    /// Column count for the grid generator.
    #[structopt(long)]
    cols: Option<usize>,
    /// Left side size for the bipartite generator.
    #[structopt(long)]
    left: Option<usize>,
    /// Right side size for the bipartite generator.
    #[structopt(long)]
    right: Option<usize>,
    /// Edge probability for the random generators.
    #[structopt(long)]
    p: Option<f64>,
    /// RNG seed for the random generators.
    #[structopt(long, default_value = "1")]
    seed: u64,
    /// Output path for gen mode.
    #[structopt(long, parse(from_os_str))]
    out: Option<PathBuf>,
    /// Solver raced by bench mode: serial, threads or mpi.
    #[structopt(long, default_value = "serial")]
    solver: Mode,
    /// Repetitions in bench mode.
    #[structopt(long, default_value = "5")]
    runs: usize,
}

/// Everything one invocation is going to do, validated.
#[derive(Debug)]
pub enum Settings {
    Solve {
        graph: PathBuf,
        one_based: bool,
        k: usize,
        strategy: Strategy,
        max_seconds: f64,
    },
    Generate {
        spec: GenSpec,
        out: PathBuf,
    },
    Bench {
        graph: PathBuf,
        one_based: bool,
        k: usize,
        strategy: Strategy,
        runs: usize,
        max_seconds: f64,
    },
}

#[cfg(not(tarpaulin_include))]
pub fn read_settings() -> Result<Settings, Error> {
    settings_from(CommandLineOptions::from_args())
}

fn settings_from(options: CommandLineOptions) -> Result<Settings, Error> {
    match options.mode {
        Mode::Generate => Ok(Settings::Generate {
            spec: gen_spec_from(&options)?,
            out: require(options.out, "out")?,
        }),
        Mode::Bench => Ok(Settings::Bench {
            strategy: strategy_for(options.solver, &options)?,
            graph: require(options.graph, "graph")?,
            one_based: options.one_based != 0,
            k: require(options.k, "k")?,
            runs: options.runs,
            max_seconds: options.max_sec,
        }),
        solver_mode => Ok(Settings::Solve {
            strategy: strategy_for(solver_mode, &options)?,
            graph: require(options.graph, "graph")?,
            one_based: options.one_based != 0,
            k: require(options.k, "k")?,
            max_seconds: options.max_sec,
        }),
    }
}

fn strategy_for(mode: Mode, options: &CommandLineOptions) -> Result<Strategy, Error> {
    match mode {
        Mode::Serial => Ok(Strategy::Serial),
        Mode::Threads => Ok(Strategy::Threads {
            threads: options.threads.unwrap_or_else(num_cpus::get),
            split_depth: options.split,
        }),
        Mode::Distributed => Ok(Strategy::Distributed {
            procs: options.procs.unwrap_or_else(|| num_cpus::get().max(2)),
            split_depth: options.split,
        }),
        Mode::Generate | Mode::Bench => Err(Error::ConfigError(
            "--solver must be serial, threads or mpi".to_string(),
        )),
    }
}

fn gen_spec_from(options: &CommandLineOptions) -> Result<GenSpec, Error> {
    Ok(match require(options.gen_type, "type")? {
        GenType::Complete => GenSpec::Complete {
            n: require(options.n, "n")?,
        },
        GenType::Cycle => GenSpec::Cycle {
            n: require(options.n, "n")?,
        },
        GenType::Grid => GenSpec::Grid {
            rows: require(options.rows, "rows")?,
            cols: require(options.cols, "cols")?,
        },
        GenType::Random => GenSpec::Random {
            n: require(options.n, "n")?,
            p: require(options.p, "p")?,
            seed: options.seed,
        },
        GenType::Bipartite => GenSpec::Bipartite {
            left: require(options.left, "left")?,
            right: require(options.right, "right")?,
            p: require(options.p, "p")?,
            seed: options.seed,
        },
    })
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::ConfigError(format!("missing required option --{}", name)))
}

pub fn read_graph(path: &Path, one_based: bool) -> Result<Graph, Error> {
    let file = File::open(path)?;
    parse_edge_list(BufReader::new(file), one_based)
}

/// Write a graph in the edge-list format, each stored undirected
/// edge once. Duplicates survive a round trip; self-loops cannot
/// occur in a constructed graph.
pub fn write_graph(path: &Path, graph: &Graph, one_based: bool) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let m = graph
        .iterate_edges()
        .filter(|(start, end)| start < end)
        .count();
    writeln!(out, "{} {}", graph.size(), m)?;

    let shift = if one_based { 1 } else { 0 };
    for (start, end) in graph.iterate_edges().filter(|(start, end)| start < end) {
        writeln!(out, "{} {}", start + shift, end + shift)?;
    }

    out.flush()?;
    Ok(())
}
