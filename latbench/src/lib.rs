#![cfg_attr(docsrs, feature(doc_cfg))]
//! Latency sampling for a unit of work.
//!
//! A [`Workload`] is invoked once per index of a workload, every invocation is timed, and the
//! resulting samples are reduced to min/max/mean/p95/p99 along with wall-clock throughput.
//! Scenarios run sequentially, concurrently across a fixed number of workers, or as a
//! simulated cluster where each invocation is followed by a random network delay.
//!
//! ```no_run
//! use latbench::prelude::*;
//! use std::convert::Infallible;
//!
//! #[tokio::main]
//! async fn main() {
//!     let runner = ScenarioRunner::new(|idx: usize| {
//!         std::hint::black_box(idx * 2);
//!         Ok::<_, Infallible>(())
//!     });
//!
//!     let configs = vec![
//!         ScenarioConfig::new("sequential_10000", 10_000),
//!         ScenarioConfig::new("threads_4", 40_000).concurrent(4),
//!         ScenarioConfig::new("cluster_3", 15_000).simulated_cluster(3, DEFAULT_NETWORK_DELAY),
//!     ];
//!
//!     let summary = runner.run_all(configs, &mut LogSink).await;
//!     assert!(summary.all_completed());
//! }
//! ```

pub mod delay;
pub mod report;
pub mod sampler;
pub mod scenario;
mod telemetry;

pub use latbench_core as core;
pub use latbench_core::{
    aggregate, BenchError, DelayRange, SampleSet, ScenarioConfig, ScenarioMode, ScenarioResult,
    Stats,
};

pub use delay::{DelaySource, NetworkDelay};
pub use report::{LogSink, ReportSink, RunSummary, ScenarioOutcome};
pub use sampler::{collect, collect_concurrent, partition, Workload};
pub use scenario::{Scenario, ScenarioRunner, ScenarioState};

pub mod prelude {
    pub use crate::report::{LogSink, ReportSink, RunSummary, ScenarioOutcome};
    pub use crate::scenario::{ScenarioRunner, ScenarioState};
    pub use crate::sampler::Workload;
    pub use latbench_core::DEFAULT_NETWORK_DELAY;
    pub use latbench_core::{BenchError, DelayRange, ScenarioConfig, ScenarioMode, Stats};
}
