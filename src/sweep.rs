//! Pool-size sweeps.
//!
//! Runs the same trace against a range of pool sizes, one fresh engine per
//! size, so the wait-time cost of removing machines can be read off a
//! single table.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::info;

use crate::models::{JobRequest, Seconds};
use crate::report::{WaitHistogram, WaitKpi};
use crate::simulation::{SimulationConfig, SimulationEngine, SimulationError};

/// Results for one pool size.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// Machines simulated.
    pub pool_size: usize,
    /// Wait-time distribution.
    pub histogram: WaitHistogram,
    /// Wait and utilization indicators.
    pub kpi: WaitKpi,
}

/// Simulates `jobs` once per pool size in `sizes`.
pub fn sweep(
    jobs: &[JobRequest],
    sizes: RangeInclusive<usize>,
    overhead: Seconds,
) -> Result<Vec<SweepPoint>, SimulationError> {
    let base = SimulationConfig::new(*sizes.start(), overhead);
    sizes
        .map(|pool_size| {
            let config = base.with_pool_size(pool_size);
            let outcome = SimulationEngine::simulate(config, jobs)?;
            let kpi = WaitKpi::calculate(&outcome, pool_size);
            info!(
                pool_size,
                p90_wait = kpi.p90_wait,
                avg_utilization = kpi.avg_utilization,
                "sweep point"
            );
            Ok(SweepPoint {
                pool_size,
                histogram: WaitHistogram::from_waits(&outcome.wait_times),
                kpi,
            })
        })
        .collect()
}

/// Smallest pool whose 90th percentile wait is within `max_p90_wait`.
pub fn smallest_meeting(points: &[SweepPoint], max_p90_wait: Seconds) -> Option<&SweepPoint> {
    points
        .iter()
        .filter(|p| p.kpi.p90_wait <= max_p90_wait)
        .min_by_key(|p| p.pool_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(n: usize) -> Vec<JobRequest> {
        (0..n).map(|_| JobRequest::new(0, 100)).collect()
    }

    #[test]
    fn test_sweep_one_point_per_size() {
        let points = sweep(&burst(4), 1..=4, 0).unwrap();
        let sizes: Vec<usize> = points.iter().map(|p| p.pool_size).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4]);
        assert!(points.iter().all(|p| p.kpi.job_count == 4));
    }

    #[test]
    fn test_more_machines_never_wait_longer() {
        let points = sweep(&burst(6), 1..=6, 30).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].kpi.total_wait_hours <= pair[0].kpi.total_wait_hours);
        }
        assert_eq!(points[5].kpi.max_wait, 0);
    }

    #[test]
    fn test_smallest_meeting() {
        // 4 jobs of 100s: 1 machine p90 = 300, 2 -> 100, 4 -> 0.
        let points = sweep(&burst(4), 1..=4, 0).unwrap();
        assert_eq!(smallest_meeting(&points, 100).unwrap().pool_size, 2);
        assert_eq!(smallest_meeting(&points, 0).unwrap().pool_size, 4);
    }

    #[test]
    fn test_smallest_meeting_none() {
        let points = sweep(&burst(4), 1..=1, 0).unwrap();
        assert!(smallest_meeting(&points, 10).is_none());
    }

    #[test]
    fn test_sweep_rejects_zero_pool() {
        assert!(sweep(&burst(1), 0..=2, 0).is_err());
    }
}
