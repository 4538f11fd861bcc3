//! One-shot greedy DSATUR pre-pass.

use super::{
    dsatur::{choose_vertex, feasible},
    ColoringResult,
};
use crate::graph::{Color, Graph, UNCOLORED};

/// Color vertices in DSATUR order with the smallest feasible color.
/// Completing every vertex is a proof of colorability; getting
/// stuck proves nothing and sends the caller into the exact search.
pub(crate) fn greedy_dsatur(graph: &Graph, k: usize) -> ColoringResult {
    let degree = graph.degrees();
    let mut result = ColoringResult {
        color: vec![UNCOLORED; graph.size()],
        ..ColoringResult::default()
    };

    for _ in 0..graph.size() {
        let u = match choose_vertex(graph, &result.color, &degree) {
            Some(u) => u,
            None => break,
        };
        result.nodes += 1;

        match (0..k as Color).find(|&c| feasible(graph, u, c, &result.color)) {
            Some(c) => result.color[u] = c,
            None => {
                result.color.clear();
                return result;
            }
        }
    }

    result.success = true;
    result
}
