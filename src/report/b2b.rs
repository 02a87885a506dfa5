//! Build-to-build overhead estimation.
//!
//! Estimates the time a worker spends between finishing one job and
//! starting the next (reboot, cleanup, runner startup) from real build
//! records.
//!
//! # Algorithm
//!
//! 1. Group records by worker and sort each group by start time.
//! 2. Drop records that started within [`QUEUED_THRESHOLD`] of their
//!    request: the worker was idle waiting for work, so the gap before
//!    them measures idleness, not overhead.
//! 3. For each remaining record after the first, the gap is
//!    `start - previous.end`. Negative gaps (overlapping records) are
//!    logged and discarded.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::{mean, percentile};
use crate::models::{BuildRecord, Seconds};

/// Records starting closer than this to their request are skipped (s).
pub const QUEUED_THRESHOLD: Seconds = 60;

/// Build-to-build gap statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct B2bSummary {
    /// Number of gaps measured.
    pub samples: usize,
    /// 10th percentile gap (s).
    pub p10: Seconds,
    /// Mean gap (s).
    pub mean: f64,
    /// Median gap (s).
    pub median: Seconds,
    /// Smallest gap (s).
    pub min: Seconds,
    /// Gaps per worker, in start order.
    pub per_worker: BTreeMap<String, Vec<Seconds>>,
}

/// Estimates build-to-build gaps from build records.
///
/// Records without a worker name are ignored. Returns `None` when no gap
/// could be measured.
pub fn estimate(records: &[BuildRecord]) -> Option<B2bSummary> {
    let mut by_worker: BTreeMap<&str, Vec<&BuildRecord>> = BTreeMap::new();
    let mut anonymous = 0usize;
    for record in records {
        match record.worker() {
            Some(worker) => by_worker.entry(worker).or_default().push(record),
            None => anonymous += 1,
        }
    }
    if anonymous > 0 {
        debug!(records = anonymous, "skipped records without a worker");
    }

    let mut per_worker = BTreeMap::new();
    let mut gaps = Vec::new();

    for (worker, mut runs) in by_worker {
        runs.sort_by_key(|r| r.start_time);
        let mut worker_gaps = Vec::new();
        let mut last: Option<&BuildRecord> = None;

        for run in runs {
            if (run.start_time - run.request_time).abs() < QUEUED_THRESHOLD {
                continue;
            }
            if let Some(prev) = last {
                let gap = run.start_time - prev.end_time;
                if gap < 0 {
                    warn!(worker, gap, "overlapping records, discarding gap");
                } else {
                    worker_gaps.push(gap);
                }
            }
            last = Some(run);
        }

        gaps.extend_from_slice(&worker_gaps);
        if !worker_gaps.is_empty() {
            per_worker.insert(worker.to_string(), worker_gaps);
        }
    }

    Some(B2bSummary {
        samples: gaps.len(),
        p10: percentile(&gaps, 10.0)?,
        mean: mean(&gaps)?,
        median: percentile(&gaps, 50.0)?,
        min: gaps.iter().copied().min()?,
        per_worker,
    })
}

impl fmt::Display for B2bSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "10th percentile b2b: {}", self.p10)?;
        writeln!(f, "mean b2b: {:.2}", self.mean)?;
        writeln!(f, "median b2b: {}", self.median)?;
        write!(f, "min b2b: {}", self.min)
    }
}
