//! Time-ordered event queue.
//!
//! A binary min-heap over [`ScheduledEvent`]. Each insertion is stamped
//! with a monotonically increasing sequence number, so events that tie on
//! `(time, kind)` come out in the order they went in.
//!
//! # Complexity
//! O(log n) insert and pop.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Event, ScheduledEvent, SimulationError};
use crate::models::Seconds;

/// Pending events, earliest first.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Inserts an event, keeping `(time, kind, insertion)` order.
    pub fn insert(&mut self, time: Seconds, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledEvent { time, event, seq }));
    }

    /// Removes and returns the earliest event.
    pub fn pop_earliest(&mut self) -> Result<ScheduledEvent, SimulationError> {
        self.heap
            .pop()
            .map(|Reverse(scheduled)| scheduled)
            .ok_or(SimulationError::EmptyQueue)
    }

    /// Time of the earliest event, if any.
    pub fn peek_time(&self) -> Option<Seconds> {
        self.heap.peek().map(|Reverse(scheduled)| scheduled.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no events remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
