//! In-process message-passing substrate for the distributed
//! scheduler: tagged point-to-point messages between ranks plus
//! a collective barrier. One channel per ordered rank pair keeps
//! per-source FIFO ordering, so a RESULT is always received
//! before the SOL that follows it from the same worker.

use std::convert::TryInto;
use std::sync::{Arc, Barrier};

use crossbeam_channel::{unbounded, Receiver, Select, Sender};

use crate::graph::{Assignment, Color};

/// Rank of the dispatching master.
pub const MASTER: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Work,
    Stop,
    Result,
    Sol,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Message {
    pub source: usize,
    pub tag: Tag,
    pub payload: Vec<u8>,
}

/// One rank's view of the cluster.
pub struct Endpoint {
    rank: usize,
    outgoing: Vec<Sender<Message>>,
    incoming: Vec<Receiver<Message>>,
    barrier: Arc<Barrier>,
}

/// Build a fully connected cluster of `size` ranks. Each returned
/// endpoint is meant to be moved onto its own thread.
pub fn cluster(size: usize) -> Vec<Endpoint> {
    let barrier = Arc::new(Barrier::new(size));

    // channels[source][destination]
    let mut senders = Vec::with_capacity(size);
    let mut receivers = Vec::with_capacity(size);
    for _ in 0..size {
        let mut sender_row = Vec::with_capacity(size);
        let mut receiver_row = Vec::with_capacity(size);
        for _ in 0..size {
            let (sender, receiver) = unbounded();
            sender_row.push(sender);
            receiver_row.push(receiver);
        }
        senders.push(sender_row);
        receivers.push(receiver_row);
    }

    (0..size)
        .map(|rank| Endpoint {
            rank,
            outgoing: senders[rank].clone(),
            incoming: (0..size)
                .map(|source| receivers[source][rank].clone())
                .collect(),
            barrier: Arc::clone(&barrier),
        })
        .collect()
}

impl Endpoint {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.outgoing.len()
    }

    /// Buffered send; never blocks.
    pub fn send(&self, destination: usize, tag: Tag, payload: Vec<u8>) {
        self.outgoing[destination]
            .send(Message {
                source: self.rank,
                tag,
                payload,
            })
            .expect("destination rank hung up");
    }

    /// Blocking receive from any rank.
    pub fn recv_any(&self) -> Message {
        let mut select = Select::new();
        for receiver in &self.incoming {
            select.recv(receiver);
        }

        loop {
            let operation = select.select();
            let index = operation.index();
            match operation.recv(&self.incoming[index]) {
                Ok(message) => return message,
                Err(_) => select.remove(index),
            }
        }
    }

    /// Blocking receive from one specific rank.
    pub fn recv_from(&self, source: usize) -> Message {
        self.incoming[source].recv().expect("source rank hung up")
    }

    /// Collective barrier over the whole cluster.
    pub fn barrier(&self) {
        self.barrier.wait();
    }
}

// Wire codecs. WORK and SOL carry one little-endian i32 slot per
// vertex; RESULT carries exactly three little-endian i64 values
// (status 1/0, nodes, backtracks); STOP has no payload.

pub fn encode_colors(color: &[Color]) -> Vec<u8> {
    color.iter().flat_map(|c| c.to_le_bytes()).collect()
}

pub fn decode_colors(payload: &[u8]) -> Assignment {
    payload
        .chunks_exact(4)
        .map(|chunk| Color::from_le_bytes(chunk.try_into().expect("chunk is four bytes")))
        .collect()
}

pub fn encode_result(success: bool, nodes: u64, backtracks: u64) -> Vec<u8> {
    let words: [i64; 3] = [i64::from(success), nodes as i64, backtracks as i64];
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}

pub fn decode_result(payload: &[u8]) -> (bool, u64, u64) {
    let mut words = payload
        .chunks_exact(8)
        .map(|chunk| i64::from_le_bytes(chunk.try_into().expect("chunk is eight bytes")));

    let status = words.next().expect("RESULT carries a status word");
    let nodes = words.next().expect("RESULT carries a node count");
    let backtracks = words.next().expect("RESULT carries a backtrack count");
    (status == 1, nodes as u64, backtracks as u64)
}
