//! Idle/busy machine bookkeeping.
//!
//! Machines are plain indices in `0..size`. Idle machines are handed out
//! in FIFO order: the longest-idle machine is acquired first and released
//! machines join the back.

use std::collections::VecDeque;

use super::SimulationError;
use crate::models::MachineId;

/// Fixed-size pool of interchangeable machines.
#[derive(Debug, Clone)]
pub struct MachinePool {
    idle: VecDeque<MachineId>,
    assigned: Vec<bool>,
    busy: usize,
}

impl MachinePool {
    /// Creates a pool of `size` machines, all idle.
    pub fn new(size: usize) -> Self {
        Self {
            idle: (0..size).collect(),
            assigned: vec![false; size],
            busy: 0,
        }
    }

    /// Total number of machines.
    pub fn size(&self) -> usize {
        self.assigned.len()
    }

    /// Whether at least one machine is idle.
    pub fn has_idle(&self) -> bool {
        !self.idle.is_empty()
    }

    /// Number of idle machines.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Number of busy machines.
    pub fn busy_count(&self) -> usize {
        self.busy
    }

    /// Whether `machine` is currently assigned to a job.
    pub fn is_busy(&self, machine: MachineId) -> bool {
        self.assigned.get(machine).copied().unwrap_or(false)
    }

    /// Takes the longest-idle machine.
    ///
    /// Callers check [`has_idle`](Self::has_idle) first; an empty pool is
    /// an invariant failure, not a backlog signal.
    pub fn acquire(&mut self) -> Result<MachineId, SimulationError> {
        let machine = self.idle.pop_front().ok_or(SimulationError::NoIdleMachine {
            pool_size: self.size(),
        })?;
        self.assigned[machine] = true;
        self.busy += 1;
        Ok(machine)
    }

    /// Returns a previously acquired machine to the idle pool.
    pub fn release(&mut self, machine: MachineId) {
        debug_assert!(
            self.is_busy(machine),
            "machine {machine} released without being acquired"
        );
        if std::mem::replace(&mut self.assigned[machine], false) {
            self.busy -= 1;
        }
        self.idle.push_back(machine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_all_idle() {
        let pool = MachinePool::new(3);
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.idle_count(), 3);
        assert_eq!(pool.busy_count(), 0);
        assert!(pool.has_idle());
    }

    #[test]
    fn test_acquire_fifo_and_release() {
        let mut pool = MachinePool::new(2);
        assert_eq!(pool.acquire().unwrap(), 0);
        assert_eq!(pool.acquire().unwrap(), 1);
        assert!(!pool.has_idle());
        assert_eq!(pool.busy_count(), 2);

        pool.release(1);
        pool.release(0);
        // Released machines queue up behind each other.
        assert_eq!(pool.acquire().unwrap(), 1);
        assert_eq!(pool.acquire().unwrap(), 0);
    }

    #[test]
    fn test_acquire_empty_pool() {
        let mut pool = MachinePool::new(1);
        pool.acquire().unwrap();
        assert_eq!(
            pool.acquire(),
            Err(SimulationError::NoIdleMachine { pool_size: 1 })
        );
    }

    #[test]
    fn test_conservation() {
        let mut pool = MachinePool::new(4);
        let a = pool.acquire().unwrap();
        pool.acquire().unwrap();
        pool.release(a);
        assert_eq!(pool.idle_count() + pool.busy_count(), 4);
        assert!(!pool.is_busy(a));
    }

    #[test]
    fn test_busy_count_tracks_acquire_and_release() {
        let mut pool = MachinePool::new(5);
        let mut held = Vec::new();
        for expected in 1..=5 {
            held.push(pool.acquire().unwrap());
            assert_eq!(pool.busy_count(), expected);
            assert_eq!(pool.idle_count() + pool.busy_count(), 5);
        }
        for (i, machine) in held.into_iter().enumerate() {
            pool.release(machine);
            assert_eq!(pool.busy_count(), 4 - i);
            assert_eq!(pool.idle_count() + pool.busy_count(), 5);
        }
    }

    #[test]
    #[should_panic(expected = "released without being acquired")]
    #[cfg(debug_assertions)]
    fn test_double_release_panics_in_debug() {
        let mut pool = MachinePool::new(1);
        pool.release(0);
    }
}
