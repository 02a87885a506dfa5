//! Discrete-event dispatch loop.
//!
//! # Algorithm
//!
//! 1. Stable-sort jobs by request time and enqueue one `Request` per job.
//! 2. Pop the earliest event until the queue is empty.
//! 3. `Request(t)`: take an idle machine if there is one (wait 0) and
//!    schedule its `Finish` at `t + duration + overhead`; otherwise append
//!    the job to the FIFO backlog.
//! 4. `Finish(t, m)`: hand `m` straight to the oldest backlogged job
//!    (wait `t - request`) and schedule its next `Finish`; with no backlog,
//!    return `m` to the idle pool.
//!
//! A freed machine never passes through the idle pool when work is
//! waiting, so the overhead is paid exactly once per job.
//!
//! # Termination
//! Each `Request` schedules at most one `Finish`; each `Finish` schedules
//! at most one more. At most `pool_size` finishes are in flight and the
//! requests are finite, so the queue drains.
//!
//! # Complexity
//! O((n + p) log n) for n jobs and p machines.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{Event, EventQueue, MachinePool, SimulationConfig, SimulationError};
use crate::models::{JobRequest, MachineId, Seconds};

/// One job's assignment to a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Index of the job in the input slice.
    pub job: usize,
    /// Machine that ran it.
    pub machine: MachineId,
    /// When the job was requested (s).
    pub request_time: Seconds,
    /// When the machine started it (s).
    pub start_time: Seconds,
    /// When the job itself completed (s).
    pub completion_time: Seconds,
    /// When the machine became free again, overhead included (s).
    pub free_time: Seconds,
}

impl Dispatch {
    /// Time the job spent waiting for a machine.
    pub fn wait(&self) -> Seconds {
        self.start_time - self.request_time
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimulationOutcome {
    /// One wait time per job, in dispatch order.
    pub wait_times: Vec<Seconds>,
    /// One record per job, in dispatch order.
    pub dispatches: Vec<Dispatch>,
    /// Earliest request time in the trace (s).
    pub start_time: Seconds,
    /// Time of the last processed event (s).
    pub end_time: Seconds,
}

impl SimulationOutcome {
    /// Number of jobs dispatched.
    pub fn job_count(&self) -> usize {
        self.wait_times.len()
    }

    /// Sum of all wait times (s).
    pub fn total_wait(&self) -> Seconds {
        self.wait_times.iter().sum()
    }

    /// Simulated span from first request to last event (s).
    pub fn span(&self) -> Seconds {
        self.end_time - self.start_time
    }
}

/// Replays a job trace against a fixed machine pool.
///
/// An engine owns all of its state (event queue, idle pool, backlog) and
/// is consumed by [`run`](Self::run); independent runs use independent
/// engines.
///
/// # Example
///
/// ```
/// use u_poolsim::models::JobRequest;
/// use u_poolsim::simulation::{SimulationConfig, SimulationEngine};
///
/// let jobs = vec![JobRequest::new(0, 10), JobRequest::new(5, 10)];
/// let engine = SimulationEngine::new(SimulationConfig::new(1, 0)).unwrap();
/// let outcome = engine.run(&jobs).unwrap();
/// assert_eq!(outcome.wait_times, vec![0, 5]);
/// ```
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimulationConfig,
    queue: EventQueue,
    pool: MachinePool,
    backlog: VecDeque<usize>,
    outcome: SimulationOutcome,
}

impl SimulationEngine {
    /// Creates an engine.
    ///
    /// Rejects an empty pool (no job could ever be served) and a negative
    /// overhead.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        if config.pool_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "pool size must be at least 1".into(),
            ));
        }
        if config.overhead < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "overhead must be non-negative, got {}",
                config.overhead
            )));
        }

        Ok(Self {
            config,
            queue: EventQueue::new(),
            pool: MachinePool::new(config.pool_size),
            backlog: VecDeque::new(),
            outcome: SimulationOutcome::default(),
        })
    }

    /// Creates an engine and runs it once.
    pub fn simulate(
        config: SimulationConfig,
        jobs: &[JobRequest],
    ) -> Result<SimulationOutcome, SimulationError> {
        Self::new(config)?.run(jobs)
    }

    /// Runs the simulation to queue exhaustion.
    ///
    /// Jobs are assumed validated: non-negative request times and durations.
    pub fn run(mut self, jobs: &[JobRequest]) -> Result<SimulationOutcome, SimulationError> {
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by_key(|&i| jobs[i].request_time);

        self.queue = EventQueue::with_capacity(jobs.len() + self.config.pool_size);
        for &job in &order {
            self.queue
                .insert(jobs[job].request_time, Event::Request { job });
        }
        self.outcome.wait_times.reserve(jobs.len());
        self.outcome.dispatches.reserve(jobs.len());
        self.outcome.start_time = order.first().map_or(0, |&i| jobs[i].request_time);
        self.outcome.end_time = self.outcome.start_time;

        debug!(
            jobs = jobs.len(),
            pool_size = self.config.pool_size,
            overhead = self.config.overhead,
            "simulation started"
        );

        while !self.queue.is_empty() {
            let scheduled = self.queue.pop_earliest()?;
            debug_assert!(
                scheduled.time >= self.outcome.end_time,
                "event at {} processed after {}",
                scheduled.time,
                self.outcome.end_time
            );
            self.outcome.end_time = scheduled.time;
            trace!(time = scheduled.time, event = ?scheduled.event, "event");

            match scheduled.event {
                Event::Request { job } => self.on_request(scheduled.time, job, jobs)?,
                Event::Finish { machine } => self.on_finish(scheduled.time, machine, jobs)?,
            }

            self.check_invariants();
        }

        debug_assert!(self.backlog.is_empty(), "backlog left after queue drained");
        debug_assert_eq!(self.outcome.job_count(), jobs.len());
        debug!(
            jobs = self.outcome.job_count(),
            total_wait = self.outcome.total_wait(),
            end_time = self.outcome.end_time,
            "simulation finished"
        );

        Ok(self.outcome)
    }

    fn on_request(
        &mut self,
        now: Seconds,
        job: usize,
        jobs: &[JobRequest],
    ) -> Result<(), SimulationError> {
        if self.pool.has_idle() {
            let machine = self.pool.acquire()?;
            self.dispatch(now, job, machine, jobs)?;
        } else {
            self.backlog.push_back(job);
        }
        Ok(())
    }

    fn on_finish(
        &mut self,
        now: Seconds,
        machine: MachineId,
        jobs: &[JobRequest],
    ) -> Result<(), SimulationError> {
        match self.backlog.pop_front() {
            // Same machine goes straight to the next job.
            Some(job) => self.dispatch(now, job, machine, jobs)?,
            None => self.pool.release(machine),
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        now: Seconds,
        job: usize,
        machine: MachineId,
        jobs: &[JobRequest],
    ) -> Result<(), SimulationError> {
        let request = jobs[job];
        let (completion_time, free_time) = now
            .checked_add(request.duration)
            .and_then(|done| Some((done, done.checked_add(self.config.overhead)?)))
            .ok_or(SimulationError::TimeOverflow { job })?;
        self.queue.insert(free_time, Event::Finish { machine });

        let dispatch = Dispatch {
            job,
            machine,
            request_time: request.request_time,
            start_time: now,
            completion_time,
            free_time,
        };
        debug_assert!(dispatch.wait() >= 0, "negative wait for job {job}");
        self.outcome.wait_times.push(dispatch.wait());
        self.outcome.dispatches.push(dispatch);
        Ok(())
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.pool.idle_count() + self.pool.busy_count(),
            self.pool.size(),
            "machine pool lost or gained a machine"
        );
        debug_assert!(
            !(self.pool.has_idle() && !self.backlog.is_empty()),
            "idle machine while jobs are backlogged"
        );
    }
}
