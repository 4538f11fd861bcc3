//! DSATUR vertex selection and color feasibility.

use itertools::Itertools;

use crate::graph::{Color, Graph, VertexIndex, UNCOLORED};

/// Pick the uncolored vertex with the highest saturation, i.e. the
/// most distinct colors among its neighbors. Ties go to the larger
/// original degree, further ties to the smaller vertex index (the
/// scan order only moves on strict improvement). `None` once every
/// vertex is colored.
///
/// Pure over its inputs; saturation is recomputed on every call.
pub(crate) fn choose_vertex(
    graph: &Graph,
    color: &[Color],
    degree: &[usize],
) -> Option<VertexIndex> {
    let mut best = None;
    let mut best_saturation = 0;
    let mut best_degree = 0;

    for u in 0..graph.size() {
        if color[u] != UNCOLORED {
            continue;
        }

        let saturation = graph
            .neighbors(u)
            .iter()
            .map(|&v| color[v])
            .filter(|&c| c != UNCOLORED)
            .sorted()
            .dedup()
            .count();

        if best.is_none()
            || saturation > best_saturation
            || (saturation == best_saturation && degree[u] > best_degree)
        {
            best = Some(u);
            best_saturation = saturation;
            best_degree = degree[u];
        }
    }

    best
}

/// A color is feasible at `u` iff no neighbor already carries it.
pub(crate) fn feasible(graph: &Graph, u: VertexIndex, c: Color, color: &[Color]) -> bool {
    graph.neighbors(u).iter().all(|&v| color[v] != c)
}
