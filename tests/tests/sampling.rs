mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;
    use latbench::prelude::*;
    use latbench::{aggregate, collect, collect_concurrent, partition, SampleSet};
    use latbench_tests::{FailAt, IndexError, Recorder, Sleeper};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn aggregate_orders_percentiles() {
        init();

        let mut rng = SmallRng::seed_from_u64(42);
        for len in [1, 2, 7, 100, 1_001] {
            let samples: SampleSet = (0..len)
                .map(|_| Duration::from_micros(rng.gen_range(0..50_000)))
                .collect();
            let stats = aggregate(samples).unwrap();

            assert_eq!(stats.count, len);
            assert!(stats.min <= stats.p95);
            assert!(stats.p95 <= stats.p99);
            assert!(stats.p99 <= stats.max);
            assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        }
    }

    #[test]
    fn aggregate_empty_fails() {
        init();
        assert!(matches!(
            aggregate(SampleSet::new()),
            Err(BenchError::EmptyInput)
        ));
    }

    #[test]
    fn aggregate_reference_values() {
        init();

        let samples: SampleSet = (1..=100).map(Duration::from_micros).collect();
        let stats = aggregate(samples).unwrap();
        assert_eq!(stats.min, Duration::from_micros(1));
        assert_eq!(stats.max, Duration::from_micros(100));
        assert_eq!(stats.p95, Duration::from_micros(96));
        assert_eq!(stats.p99, Duration::from_micros(100));
    }

    #[test]
    fn collect_invokes_each_index_in_order() {
        init();

        let recorder = Recorder::new();
        let samples = collect(1_000, &recorder).unwrap();
        assert_eq!(samples.len(), 1_000);
        assert_eq!(recorder.calls(), 1_000);
        assert_eq!(recorder.seen(), (0..1_000).collect::<Vec<_>>());
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn concurrent_partitions_have_no_gaps() {
        init();

        let recorder = Recorder::new();
        let samples = collect_concurrent(100, 4, Arc::new(recorder.clone()))
            .await
            .unwrap();
        assert_eq!(samples.len(), 100);
        assert_eq!(recorder.seen_sorted(), (0..100).collect::<Vec<_>>());

        let ranges = partition(100, 4);
        assert_eq!(ranges, vec![0..25, 25..50, 50..75, 75..100]);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn worker_buffers_keep_invocation_order() {
        init();

        let step = |idx: usize| Duration::from_micros((idx % 4) as u64 * 300);
        let work = move |idx: usize| {
            std::thread::sleep(step(idx));
            Ok::<_, std::convert::Infallible>(())
        };
        let samples = collect_concurrent(100, 4, Arc::new(work)).await.unwrap();

        assert_eq!(samples.len(), 100);
        for (position, sample) in samples.as_slice().iter().enumerate() {
            assert!(*sample >= step(position), "sample {position} out of order");
        }
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn more_workers_than_work() {
        init();

        let recorder = Recorder::new();
        let runner = ScenarioRunner::from_arc(Arc::new(recorder.clone()));
        let result = runner
            .run_concurrent(ScenarioConfig::new("tiny", 3).concurrency(8))
            .await
            .unwrap();

        assert_eq!(result.stats.count, 3);
        assert_eq!(recorder.seen_sorted(), vec![0, 1, 2]);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn sequential_matches_single_worker() {
        init();

        let work = Sleeper(Duration::from_micros(200));
        let runner = ScenarioRunner::new(work);

        let sequential = runner
            .run_sequential(ScenarioConfig::new("seq", 200))
            .await
            .unwrap();
        let single = runner
            .run_concurrent(ScenarioConfig::new("conc_1", 200).concurrency(1))
            .await
            .unwrap();

        assert_eq!(sequential.stats.count, single.stats.count);
        assert!(sequential.stats.min >= Duration::from_micros(200));
        assert!(single.stats.min >= Duration::from_micros(200));

        let ratio = sequential.stats.mean.as_secs_f64() / single.stats.mean.as_secs_f64();
        assert!((0.2..5.0).contains(&ratio), "ratio was {ratio}");
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn zero_workload_rejected_before_sampling() {
        init();

        let recorder = Recorder::new();
        let runner = ScenarioRunner::from_arc(Arc::new(recorder.clone()));
        let err = runner
            .run_sequential(ScenarioConfig::new("empty", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, BenchError::InvalidConfig(_)));
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn workload_error_is_downcastable() {
        init();

        let runner = ScenarioRunner::new(FailAt(42));
        let err = runner
            .run_concurrent(ScenarioConfig::new("fail", 100).concurrency(3))
            .await
            .unwrap_err();

        match err {
            BenchError::Workload { index, source } => {
                assert_eq!(index, 42);
                assert_eq!(source.downcast_ref::<IndexError>(), Some(&IndexError(42)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
