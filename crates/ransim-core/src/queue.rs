//! Queue structures backing the scheduler and the per-class backlogs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::error::{SimError, SimResult};
use crate::time::SimTime;
use crate::traffic::Packet;

/// An entry in the event queue: a payload tagged with its scheduled time and
/// an insertion sequence number.
///
/// Ordering is by time first, then by sequence number, so entries scheduled
/// for the same slot pop in insertion order. The tie-break must be exact:
/// downstream statistics depend on deterministic ordering for
/// reproducibility.
#[derive(Debug)]
struct Scheduled<E> {
    time: SimTime,
    seq: u64,
    item: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and the earliest entry (lowest
        // time, then lowest sequence number) must sit on top.
        (self.time, self.seq).cmp(&(other.time, other.seq)).reverse()
    }
}

/// Time-ordered queue of pending events.
#[derive(Debug)]
pub struct EventQueue<E> {
    heap: BinaryHeap<Scheduled<E>>,
    next_seq: u64,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        EventQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Insert an event at its scheduled time.
    pub fn insert(&mut self, time: SimTime, item: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { time, seq, item });
    }

    /// Scheduled time of the earliest pending event.
    pub fn peek_time(&self) -> SimResult<SimTime> {
        self.heap.peek().map(|s| s.time).ok_or(SimError::EmptyQueue)
    }

    /// Remove and return the earliest pending event with its scheduled time.
    pub fn remove_earliest(&mut self) -> SimResult<(SimTime, E)> {
        self.heap
            .pop()
            .map(|s| (s.time, s.item))
            .ok_or(SimError::EmptyQueue)
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// FIFO backlog of packets blocked behind a busy channel.
///
/// One per traffic class; classes never see each other's backlog except
/// through channel contention.
#[derive(Debug, Default)]
pub struct WaitQueue {
    packets: VecDeque<Packet>,
}

impl WaitQueue {
    pub fn new() -> Self {
        WaitQueue {
            packets: VecDeque::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Append a packet to the back of the backlog.
    pub fn enqueue(&mut self, packet: Packet) {
        self.packets.push_back(packet);
    }

    /// Remove and return the oldest waiting packet.
    pub fn dequeue(&mut self) -> SimResult<Packet> {
        self.packets.pop_front().ok_or(SimError::EmptyQueue)
    }
}
