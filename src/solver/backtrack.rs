//! Depth-first exact search with cooperative stop and
//! wall-clock deadline.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{
    dsatur::{choose_vertex, feasible},
    ColoringResult, Counters, Deadline,
};
use crate::graph::{Assignment, Color, Graph, UNCOLORED};

/// Extend `color` to a complete proper k-coloring, depth first in
/// ascending color order. Returns false on exhaustion, on an
/// observed stop or on an elapsed deadline; the caller cannot tell
/// the three apart here and is not supposed to.
///
/// The stop flag and the deadline are checked on node entry and
/// again before every color branch, so a stopped worker unwinds
/// within one branch per recursion level.
pub(crate) fn backtrack_exact(
    graph: &Graph,
    k: usize,
    color: &mut Assignment,
    degree: &[usize],
    stop: &AtomicBool,
    counters: &mut Counters,
    deadline: &Deadline,
) -> bool {
    counters.nodes += 1;

    if stop.load(Ordering::Relaxed) || deadline.expired() {
        return false;
    }

    let u = match choose_vertex(graph, color, degree) {
        Some(u) => u,
        None => return true,
    };

    for c in 0..k as Color {
        if stop.load(Ordering::Relaxed) || deadline.expired() {
            return false;
        }
        if !feasible(graph, u, c, color) {
            continue;
        }

        color[u] = c;
        if backtrack_exact(graph, k, color, degree, stop, counters, deadline) {
            return true;
        }
        color[u] = UNCOLORED;
    }

    counters.backtracks += 1;
    false
}

/// Single-threaded exact search over the whole tree. The stop flag
/// exists for uniformity but never fires.
pub(crate) fn serial_search(graph: &Graph, k: usize, deadline: &Deadline) -> ColoringResult {
    let degree = graph.degrees();
    let stop = AtomicBool::new(false);

    let mut color = vec![UNCOLORED; graph.size()];
    let mut counters = Counters::default();

    let success = backtrack_exact(graph, k, &mut color, &degree, &stop, &mut counters, deadline);

    ColoringResult {
        success,
        color: if success { color } else { Assignment::new() },
        nodes: counters.nodes,
        backtracks: counters.backtracks,
        seconds: 0.0,
    }
}
