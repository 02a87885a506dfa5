//! Simulation events and their processing order.
//!
//! Events are ordered by `(time, kind, sequence)`:
//!
//! | Key | Order |
//! |-----|-------|
//! | time | ascending |
//! | kind | `Finish` before `Request` at equal times |
//! | sequence | insertion order |
//!
//! Putting `Finish` first lets a machine freed at `t` pick up a job that
//! arrives at the same `t` with zero wait instead of leaving it backlogged.

use std::cmp::Ordering;

use crate::models::{MachineId, Seconds};

/// A point of simulated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Job `job` (index into the input) arrives and contends for a machine.
    Request { job: usize },
    /// `machine` finishes its current job, overhead included.
    Finish { machine: MachineId },
}

impl Event {
    /// Tie-break rank at equal timestamps. Lower is processed first.
    pub fn rank(&self) -> u8 {
        match self {
            Event::Finish { .. } => 0,
            Event::Request { .. } => 1,
        }
    }
}

/// An event bound to a simulated time and an insertion sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// When the event fires (s).
    pub time: Seconds,
    /// What happens.
    pub event: Event,
    /// Insertion sequence assigned by the queue.
    pub(crate) seq: u64,
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.event.rank().cmp(&other.event.rank()))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
