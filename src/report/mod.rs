//! Wait-time reporting.
//!
//! Folds simulated (or observed) wait times into the summaries used for
//! pool sizing decisions, and estimates build-to-build overhead from real
//! build logs.
//!
//! # Reports
//!
//! | Report | Input | Content |
//! |--------|-------|---------|
//! | `WaitHistogram` | wait times | 15-minute buckets up to an hour, total wait |
//! | `WaitKpi` | simulation outcome | percentiles, zero-wait rate, utilization |
//! | `B2bSummary` | build records | per-worker gaps between consecutive jobs |

pub mod b2b;
mod histogram;
mod kpi;

pub use b2b::B2bSummary;
pub use histogram::{WaitBucket, WaitHistogram, BUCKET_WIDTH, HOUR};
pub use kpi::WaitKpi;

use crate::models::Seconds;

/// Nearest-rank percentile: `sorted[floor(len * p / 100)]`.
///
/// The index is clamped to the last element, so `p = 100` yields the
/// maximum. Returns `None` for an empty slice.
pub fn percentile(values: &[Seconds], p: f64) -> Option<Seconds> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[percentile_index(sorted.len(), p)])
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[Seconds]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

pub(crate) fn percentile_index(len: usize, p: f64) -> usize {
    let idx = (len as f64 * p.clamp(0.0, 100.0) / 100.0) as usize;
    idx.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_nearest_rank() {
        let values: Vec<Seconds> = (1..=10).rev().collect();
        assert_eq!(percentile(&values, 10.0), Some(2));
        assert_eq!(percentile(&values, 50.0), Some(6));
        assert_eq!(percentile(&values, 0.0), Some(1));
        assert_eq!(percentile(&values, 100.0), Some(10));
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[1, 2, 3, 4]).unwrap() - 2.5).abs() < 1e-10);
        assert_eq!(mean(&[]), None);
    }
}
