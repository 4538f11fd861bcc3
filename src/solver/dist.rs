//! Distributed scheduler: one master dispatching sub-problems to
//! single-threaded workers over the message-passing substrate.

use std::sync::atomic::AtomicBool;
use std::thread;

use super::{
    backtrack::backtrack_exact,
    subproblem::generate_subproblems,
    ColoringResult, Counters, Deadline,
};
use crate::comm::{self, cluster, Endpoint, Tag, MASTER};
use crate::graph::Graph;

/// Run the master/worker protocol on a cluster of `procs` ranks
/// (master included). The caller guarantees `procs >= 2`.
pub(crate) fn distributed_search(
    graph: &Graph,
    k: usize,
    procs: usize,
    split_depth: usize,
    deadline: &Deadline,
) -> ColoringResult {
    let degree = graph.degrees();
    let mut endpoints = cluster(procs);
    let master = endpoints.remove(0);

    thread::scope(|scope| {
        for endpoint in endpoints {
            let degree = &degree;
            scope.spawn(move || run_worker(&endpoint, graph, k, degree, deadline));
        }
        run_master(&master, graph, k, &degree, split_depth, deadline)
    })
}

fn run_master(
    endpoint: &Endpoint,
    graph: &Graph,
    k: usize,
    degree: &[usize],
    split_depth: usize,
    deadline: &Deadline,
) -> ColoringResult {
    let subproblems = generate_subproblems(graph, k, degree, split_depth);

    endpoint.barrier();

    let mut next_job = 0;
    let mut active = 0;
    for worker in 1..endpoint.size() {
        if next_job >= subproblems.len() {
            break;
        }
        endpoint.send(
            worker,
            Tag::Work,
            comm::encode_colors(&subproblems[next_job].color),
        );
        next_job += 1;
        active += 1;
    }

    let mut result = ColoringResult::default();

    while active > 0 && !result.success {
        let message = endpoint.recv_any();
        let (success, nodes, backtracks) = match message.tag {
            Tag::Result => comm::decode_result(&message.payload),
            _ => unreachable!("workers always answer with RESULT first"),
        };
        result.nodes += nodes;
        result.backtracks += backtracks;

        if success {
            // Per-source ordering guarantees the SOL follow-up is
            // next in this worker's channel.
            let solution = endpoint.recv_from(message.source);
            match solution.tag {
                Tag::Sol => result.color = comm::decode_colors(&solution.payload),
                _ => unreachable!("a successful RESULT is followed by SOL"),
            }
            result.success = true;
        } else if next_job < subproblems.len() && !deadline.expired() {
            endpoint.send(
                message.source,
                Tag::Work,
                comm::encode_colors(&subproblems[next_job].color),
            );
            next_job += 1;
        } else {
            endpoint.send(message.source, Tag::Stop, Vec::new());
            active -= 1;
        }
    }

    for worker in 1..endpoint.size() {
        endpoint.send(worker, Tag::Stop, Vec::new());
    }

    endpoint.barrier();
    result
}

fn run_worker(endpoint: &Endpoint, graph: &Graph, k: usize, degree: &[usize], deadline: &Deadline) {
    endpoint.barrier();

    loop {
        let message = endpoint.recv_from(MASTER);
        match message.tag {
            Tag::Stop => break,
            Tag::Work => {
                let mut color = comm::decode_colors(&message.payload);
                // No cross-worker cancellation: the flag is local and
                // stays unset; only the deadline cuts a running search.
                let stop = AtomicBool::new(false);
                let mut counters = Counters::default();

                let success =
                    backtrack_exact(graph, k, &mut color, degree, &stop, &mut counters, deadline);
                endpoint.send(
                    MASTER,
                    Tag::Result,
                    comm::encode_result(success, counters.nodes, counters.backtracks),
                );

                if success {
                    endpoint.send(MASTER, Tag::Sol, comm::encode_colors(&color));
                    break;
                }
            }
            Tag::Result | Tag::Sol => unreachable!("the master never sends results"),
        }
    }

    endpoint.barrier();
}
