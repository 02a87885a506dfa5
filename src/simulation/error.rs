//! Simulation error taxonomy.
//!
//! Every variant is an internal invariant failure, a configuration
//! mistake, or a trace whose times run past `Seconds::MAX`. The engine is a pure function of its input, so none of them
//! are transient and none are retried.

use thiserror::Error;

/// Errors raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Popped from an exhausted event queue.
    #[error("event queue is empty")]
    EmptyQueue,

    /// Acquired from the machine pool while every machine was busy.
    #[error("no idle machine in a pool of {pool_size}")]
    NoIdleMachine { pool_size: usize },

    /// A job's finish time does not fit in the time type.
    #[error("finish time of job {job} overflows")]
    TimeOverflow { job: usize },

    /// The engine was configured with values it cannot simulate.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}
