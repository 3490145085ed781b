mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;
    use latbench::prelude::*;
    use latbench::{DelaySource, NetworkDelay};
    use latbench_tests::Recorder;
    use rand::rngs::mock::StepRng;
    use rand::RngCore;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test]
    #[ntest::timeout(20_000)]
    async fn delay_is_part_of_every_sample() {
        init();

        let range = DelayRange::new(300, 600);
        let runner = ScenarioRunner::new(|_: usize| Ok::<_, std::convert::Infallible>(())).seed(9);
        let result = runner
            .run_simulated_cluster(ScenarioConfig::new("cluster", 90).simulated_cluster(3, range))
            .await
            .unwrap();

        assert_eq!(result.stats.count, 90);
        assert!(result.stats.min >= range.low());
        assert!(result.wall_clock >= range.low() * 30);
    }

    #[tokio::test]
    #[ntest::timeout(20_000)]
    async fn every_node_gets_its_own_generator() {
        init();

        let requested = Arc::new(Mutex::new(vec![]));
        let delays = {
            let requested = requested.clone();
            DelaySource::from_fn(move |worker| -> Box<dyn RngCore + Send> {
                requested.lock().unwrap().push(worker);
                Box::new(StepRng::new(0, 0))
            })
        };

        let recorder = Recorder::new();
        let runner = ScenarioRunner::from_arc(Arc::new(recorder.clone())).delay_source(delays);
        let result = runner
            .run_simulated_cluster(
                ScenarioConfig::new("fixed", 40).simulated_cluster(4, DelayRange::new(100, 200)),
            )
            .await
            .unwrap();

        let mut requested = requested.lock().unwrap().clone();
        requested.sort_unstable();
        assert_eq!(requested, vec![0, 1, 2, 3]);

        // A zero generator always draws the low bound.
        assert!(result.stats.min >= Duration::from_micros(100));
        assert_eq!(recorder.seen_sorted(), (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_pauses() {
        init();

        let range = DelayRange::new(100, 499);
        let draws = |seed: u64, worker: usize| -> Vec<Duration> {
            let mut delay: NetworkDelay = DelaySource::seeded(seed)
                .for_worker(worker, range)
                .unwrap();
            (0..64).map(|_| delay.next_delay()).collect()
        };

        assert_eq!(draws(5, 0), draws(5, 0));
        assert_eq!(draws(5, 2), draws(5, 2));
        assert_ne!(draws(5, 0), draws(5, 1));
        assert!(draws(5, 0).iter().all(|d| range.contains(*d)));
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn delay_ignored_outside_cluster_mode() {
        init();

        let runner = ScenarioRunner::new(|_: usize| Ok::<_, std::convert::Infallible>(()));
        let result = runner
            .run_concurrent(
                ScenarioConfig::new("no_delay", 50)
                    .concurrency(2)
                    .network_delay(DelayRange::new(50_000, 50_000)),
            )
            .await
            .unwrap();

        assert!(result.stats.max < Duration::from_millis(50));
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn inverted_delay_rejected() {
        init();

        let recorder = Recorder::new();
        let runner = ScenarioRunner::from_arc(Arc::new(recorder.clone()));
        let err = runner
            .run_simulated_cluster(
                ScenarioConfig::new("bad", 10).simulated_cluster(2, DelayRange::new(500, 100)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BenchError::InvalidConfig(_)));
        assert_eq!(recorder.calls(), 0);
    }
}
