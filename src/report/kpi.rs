//! Simulation quality metrics (KPIs).
//!
//! Computes pool-sizing indicators from a completed simulation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Mean Wait | mean(start - request) |
//! | Max Wait | Largest single wait |
//! | P50/P90/P99 | Nearest-rank wait percentiles |
//! | Zero-Wait Rate | Fraction of jobs started on request |
//! | Span | First request to last machine release |
//! | Avg Utilization | Mean share of the span machines spent running jobs |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use super::{mean, percentile_index, HOUR};
use crate::models::Seconds;
use crate::simulation::SimulationOutcome;

/// Wait-time and utilization indicators.
///
/// All time values are in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct WaitKpi {
    /// Jobs simulated.
    pub job_count: usize,
    /// Mean wait (s).
    pub mean_wait: f64,
    /// Longest wait (s).
    pub max_wait: Seconds,
    /// Median wait (s).
    pub p50_wait: Seconds,
    /// 90th percentile wait (s).
    pub p90_wait: Seconds,
    /// 99th percentile wait (s).
    pub p99_wait: Seconds,
    /// Fraction of jobs with zero wait (0.0..1.0).
    pub zero_wait_rate: f64,
    /// Sum of all waits (hours).
    pub total_wait_hours: f64,
    /// First request to last event (s).
    pub span: Seconds,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-machine utilization, indexed by machine.
    pub utilization_by_machine: Vec<f64>,
}

impl WaitKpi {
    /// Computes KPIs from a simulation outcome.
    ///
    /// # Arguments
    /// * `outcome` - The finished simulation.
    /// * `pool_size` - Machines in the simulated pool (idle ones count
    ///   toward the utilization denominator).
    pub fn calculate(outcome: &SimulationOutcome, pool_size: usize) -> Self {
        let waits = &outcome.wait_times;
        let job_count = waits.len();

        let mut sorted = waits.clone();
        sorted.sort_unstable();
        let pct = |p: f64| {
            if sorted.is_empty() {
                0
            } else {
                sorted[percentile_index(sorted.len(), p)]
            }
        };

        let zero_wait_rate = if job_count == 0 {
            1.0
        } else {
            waits.iter().filter(|&&w| w == 0).count() as f64 / job_count as f64
        };

        // Utilization counts job runtime only; overhead is not useful work.
        let span = outcome.span();
        let mut busy = vec![0 as Seconds; pool_size];
        for d in &outcome.dispatches {
            if let Some(slot) = busy.get_mut(d.machine) {
                *slot += d.completion_time - d.start_time;
            }
        }
        let utilization_by_machine: Vec<f64> = busy
            .iter()
            .map(|&b| if span > 0 { b as f64 / span as f64 } else { 0.0 })
            .collect();
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        Self {
            job_count,
            mean_wait: mean(waits).unwrap_or(0.0),
            max_wait: sorted.last().copied().unwrap_or(0),
            p50_wait: pct(50.0),
            p90_wait: pct(90.0),
            p99_wait: pct(99.0),
            zero_wait_rate,
            total_wait_hours: outcome.total_wait() as f64 / HOUR as f64,
            span,
            avg_utilization,
            utilization_by_machine,
        }
    }

    /// Whether the pool meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_p90_wait: Seconds, min_utilization: f64) -> bool {
        self.p90_wait <= max_p90_wait && self.avg_utilization >= min_utilization
    }
}
