//! Two-coloring fast path: BFS bipartition.

use std::collections::VecDeque;

use super::ColoringResult;
use crate::graph::{Graph, UNCOLORED};

/// BFS bipartition over every connected component, rooted at the
/// lowest-numbered uncolored vertex with color 0. Exact for k = 2:
/// a conflict proves there is no 2-coloring. Counts dequeued
/// vertices as nodes.
pub(crate) fn two_color_bipartite(graph: &Graph) -> ColoringResult {
    let mut result = ColoringResult {
        color: vec![UNCOLORED; graph.size()],
        ..ColoringResult::default()
    };
    let mut queue = VecDeque::new();

    for start in 0..graph.size() {
        if result.color[start] != UNCOLORED {
            continue;
        }
        result.color[start] = 0;
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            result.nodes += 1;

            for &v in graph.neighbors(u) {
                if result.color[v] == UNCOLORED {
                    result.color[v] = 1 - result.color[u];
                    queue.push_back(v);
                } else if result.color[v] == result.color[u] {
                    result.color.clear();
                    return result;
                }
            }
        }
    }

    result.success = true;
    result
}
