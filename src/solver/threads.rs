//! Shared-memory scheduler: a mutex-protected FIFO of
//! sub-problems raced by a fixed pool of worker threads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use super::{
    backtrack::backtrack_exact,
    subproblem::{generate_subproblems, Subproblem},
    ColoringResult, Counters, Deadline,
};
use crate::graph::{Assignment, Graph};

/// Split the search at `split_depth` and race `threads` workers on
/// the resulting queue. The first witness wins; everything else is
/// discarded. Counter totals are monotonic but not reproducible
/// across runs.
pub(crate) fn parallel_search(
    graph: &Graph,
    k: usize,
    threads: usize,
    split_depth: usize,
    deadline: &Deadline,
) -> ColoringResult {
    let degree = graph.degrees();
    let subproblems = generate_subproblems(graph, k, &degree, split_depth);

    let queue = Mutex::new(subproblems.into_iter().collect::<VecDeque<_>>());
    let found = AtomicBool::new(false);
    let witness: Mutex<Option<Assignment>> = Mutex::new(None);
    let nodes_sum = AtomicU64::new(0);
    let backtracks_sum = AtomicU64::new(0);

    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                run_worker(
                    graph,
                    k,
                    &degree,
                    &queue,
                    &found,
                    &witness,
                    &nodes_sum,
                    &backtracks_sum,
                    deadline,
                );
            });
        }
    });

    // All workers joined; the shared state is exclusively ours again.
    let success = found.load(Ordering::Relaxed);
    let witness = witness.into_inner().expect("witness lock poisoned");

    ColoringResult {
        success,
        color: witness.unwrap_or_default(),
        nodes: nodes_sum.into_inner(),
        backtracks: backtracks_sum.into_inner(),
        seconds: 0.0,
    }
}

#[allow(clippy::too_many_arguments)]
fn run_worker(
    graph: &Graph,
    k: usize,
    degree: &[usize],
    queue: &Mutex<VecDeque<Subproblem>>,
    found: &AtomicBool,
    witness: &Mutex<Option<Assignment>>,
    nodes_sum: &AtomicU64,
    backtracks_sum: &AtomicU64,
    deadline: &Deadline,
) {
    while !found.load(Ordering::Relaxed) {
        if deadline.expired() {
            break;
        }

        let subproblem = match queue.lock().expect("work queue lock poisoned").pop_front() {
            Some(subproblem) => subproblem,
            None => break,
        };

        let mut color = subproblem.color;
        let mut counters = Counters::default();
        let success = backtrack_exact(graph, k, &mut color, degree, found, &mut counters, deadline);

        nodes_sum.fetch_add(counters.nodes, Ordering::Relaxed);
        backtracks_sum.fetch_add(counters.backtracks, Ordering::Relaxed);

        if success {
            // Exactly one worker wins the false → true transition and
            // publishes its witness; losers drop theirs.
            if found
                .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                *witness.lock().expect("witness lock poisoned") = Some(color);
            }
            return;
        }
    }
}
