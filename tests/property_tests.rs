//! Property-based tests for the simulation engine and reports.

use proptest::prelude::*;
use u_poolsim::models::{JobRequest, Seconds};
use u_poolsim::report::WaitHistogram;
use u_poolsim::simulation::{SimulationConfig, SimulationEngine};

fn jobs_strategy() -> impl Strategy<Value = Vec<JobRequest>> {
    prop::collection::vec((0i64..10_000, 0i64..5_000), 0..200)
        .prop_map(|pairs| pairs.into_iter().map(JobRequest::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_one_wait_per_job(jobs in jobs_strategy(), pool in 1usize..8, overhead in 0i64..600) {
        let outcome = SimulationEngine::simulate(SimulationConfig::new(pool, overhead), &jobs).unwrap();
        prop_assert_eq!(outcome.wait_times.len(), jobs.len());

        // Every input job is dispatched exactly once.
        let mut seen: Vec<usize> = outcome.dispatches.iter().map(|d| d.job).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..jobs.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_waits_non_negative(jobs in jobs_strategy(), pool in 1usize..8, overhead in 0i64..600) {
        let outcome = SimulationEngine::simulate(SimulationConfig::new(pool, overhead), &jobs).unwrap();
        prop_assert!(outcome.wait_times.iter().all(|&w| w >= 0));
    }

    #[test]
    fn prop_machine_never_double_booked(jobs in jobs_strategy(), pool in 1usize..8, overhead in 0i64..600) {
        let outcome = SimulationEngine::simulate(SimulationConfig::new(pool, overhead), &jobs).unwrap();
        let mut by_machine: Vec<Vec<(Seconds, Seconds)>> = vec![Vec::new(); pool];
        for d in &outcome.dispatches {
            prop_assert!(d.machine < pool);
            by_machine[d.machine].push((d.start_time, d.free_time));
        }
        for spans in &mut by_machine {
            spans.sort_unstable();
            for pair in spans.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].0);
            }
        }
    }

    #[test]
    fn prop_deterministic(jobs in jobs_strategy(), pool in 1usize..8, overhead in 0i64..600) {
        let config = SimulationConfig::new(pool, overhead);
        let a = SimulationEngine::simulate(config, &jobs).unwrap();
        let b = SimulationEngine::simulate(config, &jobs).unwrap();
        prop_assert_eq!(a.wait_times, b.wait_times);
        prop_assert_eq!(a.dispatches, b.dispatches);
    }

    #[test]
    fn prop_enough_machines_never_wait(jobs in jobs_strategy(), overhead in 0i64..600) {
        let pool = jobs.len().max(1);
        let outcome = SimulationEngine::simulate(SimulationConfig::new(pool, overhead), &jobs).unwrap();
        prop_assert!(outcome.wait_times.iter().all(|&w| w == 0));
    }

    #[test]
    fn prop_spaced_jobs_never_wait(
        durations in prop::collection::vec(0i64..100, 1..100),
    ) {
        // Each job arrives after the previous one has finished.
        let jobs: Vec<JobRequest> = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| JobRequest::new(i as Seconds * 100, d))
            .collect();
        let outcome = SimulationEngine::simulate(SimulationConfig::new(1, 0), &jobs).unwrap();
        prop_assert!(outcome.wait_times.iter().all(|&w| w == 0));
    }

    #[test]
    fn prop_histogram_counts_every_wait(waits in prop::collection::vec(0i64..20_000, 0..300)) {
        let histogram = WaitHistogram::from_waits(&waits);
        let counted: usize = histogram.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, waits.len());
        prop_assert_eq!(histogram, WaitHistogram::from_waits(&waits));
    }
}
