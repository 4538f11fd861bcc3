//! Sub-problem decomposition: breadth-first expansion of the
//! search-tree prefix to a fixed split depth.

use super::dsatur::{choose_vertex, feasible};
use crate::graph::{Assignment, Color, Graph, UNCOLORED};

/// A partial assignment rooted at one branch of the shared search
/// prefix. Owns its assignment and is consumed by exactly one
/// worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Subproblem {
    pub color: Assignment,
}

/// Expand the search tree for `split_depth` levels, pruning
/// infeasible branches as they appear and carrying completed
/// assignments forward unchanged.
///
/// DSATUR is deterministic over its inputs, so the sub-searches
/// rooted at the returned assignments visit exactly the leaves of
/// the serial search, partitioned without overlap.
pub(crate) fn generate_subproblems(
    graph: &Graph,
    k: usize,
    degree: &[usize],
    split_depth: usize,
) -> Vec<Subproblem> {
    let mut frontier = vec![Subproblem {
        color: vec![UNCOLORED; graph.size()],
    }];

    for _ in 0..split_depth {
        let mut next = Vec::with_capacity(frontier.len() * k.max(1));

        for subproblem in &frontier {
            match choose_vertex(graph, &subproblem.color, degree) {
                None => next.push(subproblem.clone()),
                Some(u) => {
                    for c in 0..k as Color {
                        if !feasible(graph, u, c, &subproblem.color) {
                            continue;
                        }
                        let mut child = subproblem.color.clone();
                        child[u] = c;
                        next.push(Subproblem { color: child });
                    }
                }
            }
        }

        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }

    frontier
}
