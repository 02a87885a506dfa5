//! Discrete-event queueing simulation.
//!
//! Replays a stream of `(request time, duration)` pairs against a pool of
//! `N` interchangeable machines, each paying a fixed build-to-build
//! overhead `B` after every job, and reports the wait each job would have
//! experienced.
//!
//! # Model
//!
//! - Single job class, no priorities, FIFO backlog.
//! - Fixed pool size and fixed overhead for the whole run.
//! - Fully deterministic: the same trace and configuration always produce
//!   the same wait times in the same order.
//!
//! # Usage
//!
//! ```
//! use u_poolsim::models::JobRequest;
//! use u_poolsim::simulation::{SimulationConfig, SimulationEngine};
//!
//! let jobs = vec![JobRequest::new(0, 10), JobRequest::new(0, 10), JobRequest::new(0, 10)];
//! let outcome = SimulationEngine::simulate(SimulationConfig::new(2, 0), &jobs).unwrap();
//! assert_eq!(outcome.wait_times, vec![0, 0, 10]);
//! ```
//!
//! # References
//!
//! - Law (2015), "Simulation Modeling and Analysis", Ch. 1.4 (next-event time advance)
//! - Kleinrock (1975), "Queueing Systems, Volume 1"

mod config;
mod engine;
mod error;
mod event;
mod pool;
mod queue;

pub use config::SimulationConfig;
pub use engine::{Dispatch, SimulationEngine, SimulationOutcome};
pub use error::SimulationError;
pub use event::{Event, ScheduledEvent};
pub use pool::MachinePool;
pub use queue::EventQueue;
