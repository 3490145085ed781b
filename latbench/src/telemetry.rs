//! Metrics emitted through the `metrics` facade. Recording only happens on the task that merges
//! worker buffers, never from worker threads.
#![cfg_attr(not(feature = "metrics"), allow(unused))]
use latbench_core::{BenchError, SampleSet, ScenarioResult};

pub(crate) const SAMPLE_LATENCY: &str = "latbench.sample.latency";
pub(crate) const SCENARIO_COMPLETED: &str = "latbench.scenario.completed";
pub(crate) const SCENARIO_FAILED: &str = "latbench.scenario.failed";
pub(crate) const SCENARIO_THROUGHPUT: &str = "latbench.scenario.throughput";

#[cfg(feature = "metrics")]
pub(crate) fn record_samples(scenario: &str, samples: &SampleSet) {
    metrics::describe_histogram!(
        SAMPLE_LATENCY,
        metrics::Unit::Microseconds,
        "Latency of a single unit of work"
    );
    let histogram = metrics::histogram!(SAMPLE_LATENCY, "scenario" => scenario.to_string());
    for latency in samples.as_slice() {
        histogram.record(latency.as_micros() as f64);
    }
}

#[cfg(feature = "metrics")]
pub(crate) fn record_outcome(scenario: &str, result: &Result<ScenarioResult, BenchError>) {
    match result {
        Ok(res) => {
            metrics::counter!(SCENARIO_COMPLETED, "scenario" => scenario.to_string()).increment(1);
            metrics::gauge!(SCENARIO_THROUGHPUT, "scenario" => scenario.to_string())
                .set(res.throughput);
        }
        Err(_) => {
            metrics::counter!(SCENARIO_FAILED, "scenario" => scenario.to_string()).increment(1);
        }
    }
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_samples(_scenario: &str, _samples: &SampleSet) {}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_outcome(_scenario: &str, _result: &Result<ScenarioResult, BenchError>) {}
