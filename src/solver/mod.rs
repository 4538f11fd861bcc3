//! The exact coloring search core: a fast-path cascade
//! (bipartition test, greedy DSATUR) in front of
//! DSATUR-ordered backtracking, run serially, on a
//! thread pool or on a master/worker rank cluster.

mod backtrack;
mod bipartite;
mod dist;
mod dsatur;
mod greedy;
mod subproblem;
mod threads;

use std::time::{Duration, Instant};

use crate::{graph::{Assignment, Graph}, Error};

/// Outcome of one solve call. `color` is a complete witness
/// iff `success`; on failure or an elapsed budget it is empty
/// and the counters report the work done so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColoringResult {
    pub success: bool,
    pub color: Assignment,
    pub nodes: u64,
    pub backtracks: u64,
    pub seconds: f64,
}

/// Node and backtrack accounting of a single worker's search.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Counters {
    pub nodes: u64,
    pub backtracks: u64,
}

/// Wall-clock budget of one solve. A non-positive budget means
/// unlimited. Copied freely into every worker of the solve.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    pub fn new(max_seconds: f64) -> Self {
        let budget = if max_seconds > 0.0 {
            Some(Duration::from_secs_f64(max_seconds))
        } else {
            None
        };
        Deadline {
            start: Instant::now(),
            budget,
        }
    }

    pub fn expired(&self) -> bool {
        match self.budget {
            Some(budget) => self.start.elapsed() > budget,
            None => false,
        }
    }
}

/// How the exact phase is executed. The fast-path cascade is
/// shared by all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Serial,
    Threads { threads: usize, split_depth: usize },
    Distributed { procs: usize, split_depth: usize },
}

/// Decide k-colorability of `graph`. Runs the bipartition test for
/// k = 2, otherwise the greedy pre-pass and, if that gets stuck,
/// the exact search under the chosen strategy.
pub fn solve(
    graph: &Graph,
    k: usize,
    strategy: &Strategy,
    max_seconds: f64,
) -> Result<ColoringResult, Error> {
    validate(strategy)?;

    let start = Instant::now();
    let deadline = Deadline::new(max_seconds);

    let mut result = if k == 2 {
        bipartite::two_color_bipartite(graph)
    } else {
        let greedy = greedy::greedy_dsatur(graph, k);
        if greedy.success {
            greedy
        } else {
            match *strategy {
                Strategy::Serial => backtrack::serial_search(graph, k, &deadline),
                Strategy::Threads {
                    threads,
                    split_depth,
                } => threads::parallel_search(graph, k, threads, split_depth, &deadline),
                Strategy::Distributed { procs, split_depth } => {
                    if procs <= 1 {
                        // A cluster without workers degenerates to the
                        // serial search, like a single-rank run would.
                        backtrack::serial_search(graph, k, &deadline)
                    } else {
                        dist::distributed_search(graph, k, procs, split_depth, &deadline)
                    }
                }
            }
        }
    };

    result.seconds = start.elapsed().as_secs_f64();
    Ok(result)
}

fn validate(strategy: &Strategy) -> Result<(), Error> {
    match *strategy {
        Strategy::Threads { threads: 0, .. } => Err(Error::ConfigError(
            "thread count must be positive".to_string(),
        )),
        Strategy::Distributed { procs: 0, .. } => Err(Error::ConfigError(
            "process count must be positive".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::verify_coloring;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut graph = Graph::new(n);
        for &(start, end) in edges {
            graph.add_edge(start, end).unwrap();
        }
        graph
    }

    fn all_strategies() -> Vec<Strategy> {
        vec![
            Strategy::Serial,
            Strategy::Threads {
                threads: 2,
                split_depth: 2,
            },
            Strategy::Distributed {
                procs: 3,
                split_depth: 2,
            },
        ]
    }

    fn solve_with(graph: &Graph, k: usize, strategy: &Strategy) -> ColoringResult {
        solve(graph, k, strategy, 0.0).unwrap()
    }

    #[test]
    fn test_empty_graph_one_color() {
        let graph = graph_from_edges(5, &[]);
        for strategy in all_strategies() {
            let result = solve_with(&graph, 1, &strategy);
            assert!(result.success);
            assert_eq!(vec![0, 0, 0, 0, 0], result.color);
        }
    }

    #[test]
    fn test_no_vertices_is_trivially_colorable() {
        let graph = Graph::new(0);
        for k in [0, 1, 2, 7] {
            let result = solve_with(&graph, k, &Strategy::Serial);
            assert!(result.success);
            assert!(result.color.is_empty());
        }
    }

    #[test]
    fn test_zero_colors_with_vertices_fails() {
        let graph = graph_from_edges(3, &[]);
        for strategy in all_strategies() {
            assert!(!solve_with(&graph, 0, &strategy).success);
        }
    }

    #[test]
    fn test_one_color_iff_edgeless() {
        let edgeless = graph_from_edges(4, &[]);
        assert!(solve_with(&edgeless, 1, &Strategy::Serial).success);

        let single_edge = graph_from_edges(4, &[(1, 3)]);
        assert!(!solve_with(&single_edge, 1, &Strategy::Serial).success);
    }

    #[test]
    fn test_triangle() {
        let triangle = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        for strategy in all_strategies() {
            assert!(!solve_with(&triangle, 2, &strategy).success);

            let result = solve_with(&triangle, 3, &strategy);
            assert!(result.success);
            assert!(verify_coloring(&triangle, &result.color, 3));
        }
    }

    #[test]
    fn test_complete_four() {
        let k4 = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        for strategy in all_strategies() {
            assert!(!solve_with(&k4, 3, &strategy).success);

            let result = solve_with(&k4, 4, &strategy);
            assert!(result.success);
            assert!(verify_coloring(&k4, &result.color, 4));
        }
    }

    #[test]
    fn test_odd_cycle() {
        let c5 = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        for strategy in all_strategies() {
            assert!(!solve_with(&c5, 2, &strategy).success);

            let result = solve_with(&c5, 3, &strategy);
            assert!(result.success);
            assert!(verify_coloring(&c5, &result.color, 3));
        }
    }

    #[test]
    fn test_bipartite_two_coloring() {
        let graph = graph_from_edges(5, &[(0, 3), (0, 4), (1, 3), (1, 4), (2, 3), (2, 4)]);
        let result = solve_with(&graph, 2, &Strategy::Serial);

        assert!(result.success);
        assert!(verify_coloring(&graph, &result.color, 2));
        // The two-color fast path keeps each side monochromatic.
        assert_eq!(result.color[0], result.color[1]);
        assert_eq!(result.color[1], result.color[2]);
        assert_eq!(result.color[3], result.color[4]);
        assert_ne!(result.color[0], result.color[3]);
    }

    #[test]
    fn test_grid_is_bipartite() {
        let mut edges = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                if r + 1 < 3 {
                    edges.push((r * 3 + c, (r + 1) * 3 + c));
                }
                if c + 1 < 3 {
                    edges.push((r * 3 + c, r * 3 + c + 1));
                }
            }
        }
        let grid = graph_from_edges(9, &edges);
        assert_eq!(12, grid.number_edges());

        for strategy in all_strategies() {
            let result = solve_with(&grid, 2, &strategy);
            assert!(result.success);
            assert!(verify_coloring(&grid, &result.color, 2));
        }
    }

    #[test]
    fn test_palette_at_least_vertex_count() {
        let k4 = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        for k in [4, 5, 10] {
            let result = solve_with(&k4, k, &Strategy::Serial);
            assert!(result.success);
            assert!(verify_coloring(&k4, &result.color, k));
        }
    }

    #[test]
    fn test_serial_is_idempotent() {
        let k4 = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);

        let first = solve_with(&k4, 3, &Strategy::Serial);
        let second = solve_with(&k4, 3, &Strategy::Serial);

        assert_eq!(first.success, second.success);
        assert_eq!(first.color, second.color);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.backtracks, second.backtracks);
    }

    #[test]
    fn test_counters_monotonic() {
        let k4 = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let result = solve_with(&k4, 3, &Strategy::Serial);

        assert!(result.nodes >= 1);
        assert!(result.backtracks <= result.nodes);
    }

    #[test]
    fn test_single_rank_cluster_falls_back_to_serial() {
        let k4 = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let distributed = solve_with(
            &k4,
            3,
            &Strategy::Distributed {
                procs: 1,
                split_depth: 2,
            },
        );
        let serial = solve_with(&k4, 3, &Strategy::Serial);

        assert_eq!(serial.success, distributed.success);
        assert_eq!(serial.nodes, distributed.nodes);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let graph = graph_from_edges(2, &[(0, 1)]);

        let threads = solve(
            &graph,
            3,
            &Strategy::Threads {
                threads: 0,
                split_depth: 1,
            },
            0.0,
        );
        assert!(matches!(threads, Err(Error::ConfigError(_))));

        let distributed = solve(
            &graph,
            3,
            &Strategy::Distributed {
                procs: 0,
                split_depth: 1,
            },
            0.0,
        );
        assert!(matches!(distributed, Err(Error::ConfigError(_))));
    }
}
