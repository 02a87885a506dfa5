//! Fixed-bucket wait-time histogram.
//!
//! | Bucket | Range (minutes) |
//! |--------|-----------------|
//! | 0 | `[0, 15)` |
//! | 1 | `[15, 30)` |
//! | 2 | `[30, 45)` |
//! | 3 | `[45, 60)` |
//! | 60+ | `[60, ∞)` |

use std::fmt;

use serde::Serialize;

use crate::models::Seconds;

/// Width of each bounded bucket (s).
pub const BUCKET_WIDTH: Seconds = 900;
/// Lower bound of the open-ended bucket (s).
pub const HOUR: Seconds = 3600;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitBucket {
    /// Inclusive lower bound (minutes).
    pub from_minutes: i64,
    /// Exclusive upper bound (minutes). `None` = open-ended.
    pub to_minutes: Option<i64>,
    /// Number of jobs in the bucket.
    pub count: usize,
    /// Share of all jobs (0.0..100.0).
    pub percent: f64,
}

/// Wait-time distribution plus total wait.
///
/// A pure function of the wait sequence: the same input always produces
/// the same counts and percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitHistogram {
    /// Bounded buckets followed by the open-ended one.
    pub buckets: Vec<WaitBucket>,
    /// Number of wait times folded in.
    pub total_jobs: usize,
    /// Sum of all waits, in whole hours (truncated).
    pub total_wait_hours: i64,
}

impl WaitHistogram {
    /// Buckets a sequence of wait times.
    pub fn from_waits(waits: &[Seconds]) -> Self {
        let total_jobs = waits.len();
        let percent = |count: usize| {
            if total_jobs == 0 {
                0.0
            } else {
                100.0 * count as f64 / total_jobs as f64
            }
        };

        let mut buckets: Vec<WaitBucket> = (0..HOUR)
            .step_by(BUCKET_WIDTH as usize)
            .map(|from| {
                let to = from + BUCKET_WIDTH;
                let count = waits.iter().filter(|&&w| w >= from && w < to).count();
                WaitBucket {
                    from_minutes: from / 60,
                    to_minutes: Some(to / 60),
                    count,
                    percent: percent(count),
                }
            })
            .collect();

        let over = waits.iter().filter(|&&w| w >= HOUR).count();
        buckets.push(WaitBucket {
            from_minutes: HOUR / 60,
            to_minutes: None,
            count: over,
            percent: percent(over),
        });

        Self {
            buckets,
            total_jobs,
            total_wait_hours: waits.iter().sum::<Seconds>() / HOUR,
        }
    }

    /// Count in the open-ended bucket.
    pub fn over_hour(&self) -> usize {
        self.buckets.last().map_or(0, |b| b.count)
    }
}

impl fmt::Display for WaitHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in &self.buckets {
            match bucket.to_minutes {
                Some(to) => writeln!(
                    f,
                    "{} - {}: {} ({:.2}%)",
                    bucket.from_minutes, to, bucket.count, bucket.percent
                )?,
                None => writeln!(
                    f,
                    "{}+      : {} ({:.2}%)",
                    bucket.from_minutes, bucket.count, bucket.percent
                )?,
            }
        }
        write!(f, "Total wait: {} hours", self.total_wait_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let h = WaitHistogram::from_waits(&[0, 899, 900, 1800, 2700, 3599, 3600, 7200]);
        let counts: Vec<usize> = h.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 2, 2]);
        assert_eq!(h.over_hour(), 2);
        assert_eq!(h.total_jobs, 8);
    }

    #[test]
    fn test_percentages() {
        let h = WaitHistogram::from_waits(&[0, 0, 0, 1000]);
        assert!((h.buckets[0].percent - 75.0).abs() < 1e-10);
        assert!((h.buckets[1].percent - 25.0).abs() < 1e-10);
        let sum: f64 = h.buckets.iter().map(|b| b.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_wait_truncated_hours() {
        let h = WaitHistogram::from_waits(&[3600, 3600, 1800]);
        assert_eq!(h.total_wait_hours, 2);
    }

    #[test]
    fn test_empty_waits() {
        let h = WaitHistogram::from_waits(&[]);
        assert_eq!(h.buckets.len(), 5);
        assert!(h.buckets.iter().all(|b| b.count == 0 && b.percent == 0.0));
        assert_eq!(h.total_wait_hours, 0);
    }

    #[test]
    fn test_idempotent() {
        let waits = vec![5, 4000, 1200, 0, 2800];
        assert_eq!(
            WaitHistogram::from_waits(&waits),
            WaitHistogram::from_waits(&waits)
        );
    }

    #[test]
    fn test_display_layout() {
        let text = WaitHistogram::from_waits(&[0, 4000]).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0 - 15: 1 (50.00%)");
        assert_eq!(lines[3], "45 - 60: 0 (0.00%)");
        assert_eq!(lines[4], "60+      : 1 (50.00%)");
        assert_eq!(lines[5], "Total wait: 1 hours");
    }
}
