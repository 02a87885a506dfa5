//! Seeded synthetic traces.
//!
//! Generates Bernoulli arrivals: at every step a job arrives with
//! probability `p_arrival`, and is short with probability `p_short`.
//! Useful for exercising pool sweeps without real build data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{JobRequest, Seconds};

/// Parameters for a synthetic Bernoulli-arrival trace.
#[derive(Debug, Clone)]
pub struct SyntheticTrace {
    /// Number of arrival steps.
    pub steps: u64,
    /// Simulated time between steps (s).
    pub step_seconds: Seconds,
    /// Probability of an arrival at each step (0.0..1.0).
    pub p_arrival: f64,
    /// Probability that an arriving job is short (0.0..1.0).
    pub p_short: f64,
    /// Duration of short jobs (s).
    pub short_duration: Seconds,
    /// Duration of long jobs (s).
    pub long_duration: Seconds,
    /// RNG seed.
    pub seed: u64,
}

impl SyntheticTrace {
    /// Creates a generator with CI-like defaults: one step per minute,
    /// 10-minute short jobs and 1-hour long jobs.
    pub fn new(steps: u64, seed: u64) -> Self {
        Self {
            steps,
            step_seconds: 60,
            p_arrival: 0.3,
            p_short: 0.3,
            short_duration: 600,
            long_duration: 3600,
            seed,
        }
    }

    /// Sets the arrival probability. NaN is treated as 0.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.p_arrival = probability(p);
        self
    }

    /// Sets the short-job probability. NaN is treated as 0.
    pub fn with_short_probability(mut self, p: f64) -> Self {
        self.p_short = probability(p);
        self
    }

    /// Sets short and long job durations.
    pub fn with_durations(mut self, short: Seconds, long: Seconds) -> Self {
        self.short_duration = short;
        self.long_duration = long;
        self
    }

    /// Sets the step length.
    pub fn with_step_seconds(mut self, step_seconds: Seconds) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    /// Generates the trace, sorted by request time.
    pub fn generate(&self) -> Vec<JobRequest> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let p_arrival = probability(self.p_arrival);
        let p_short = probability(self.p_short);
        let mut jobs = Vec::new();

        for step in 0..self.steps {
            if rng.random_bool(p_arrival) {
                let duration = if rng.random_bool(p_short) {
                    self.short_duration
                } else {
                    self.long_duration
                };
                jobs.push(JobRequest::new(step as Seconds * self.step_seconds, duration));
            }
        }

        jobs
    }
}

// `clamp` passes NaN through, and `random_bool` panics on it.
fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_trace() {
        let a = SyntheticTrace::new(500, 7).generate();
        let b = SyntheticTrace::new(500, 7).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_durations_and_times() {
        let jobs = SyntheticTrace::new(200, 1)
            .with_durations(5, 50)
            .with_step_seconds(10)
            .generate();
        assert!(!jobs.is_empty());
        for job in &jobs {
            assert!(job.duration == 5 || job.duration == 50);
            assert_eq!(job.request_time % 10, 0);
        }
        assert!(jobs.windows(2).all(|w| w[0].request_time < w[1].request_time));
    }

    #[test]
    fn test_certain_arrival() {
        let jobs = SyntheticTrace::new(50, 3)
            .with_arrival_probability(1.0)
            .with_short_probability(0.0)
            .generate();
        assert_eq!(jobs.len(), 50);
        assert!(jobs.iter().all(|j| j.duration == 3600));
    }

    #[test]
    fn test_no_arrivals() {
        let jobs = SyntheticTrace::new(50, 3)
            .with_arrival_probability(0.0)
            .generate();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_nan_probability_means_never() {
        let jobs = SyntheticTrace::new(10, 0)
            .with_arrival_probability(f64::NAN)
            .generate();
        assert!(jobs.is_empty());

        let jobs = SyntheticTrace::new(10, 0)
            .with_arrival_probability(1.0)
            .with_short_probability(f64::NAN)
            .generate();
        assert!(jobs.iter().all(|j| j.duration == 3600));
    }

    #[test]
    fn test_nan_set_directly_does_not_panic() {
        let mut trace = SyntheticTrace::new(10, 0);
        trace.p_arrival = f64::NAN;
        trace.p_short = f64::NAN;
        assert!(trace.generate().is_empty());
    }
}
