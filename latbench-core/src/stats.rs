use crate::{BenchError, SampleSet, ScenarioConfig, P50, P95, P99};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
#[cfg(feature = "serde")]
use serde_with::{serde_as, DurationMicroSeconds};
use std::fmt;
use std::time::Duration;

/// Distribution summary of one [`SampleSet`].
///
/// Percentiles are picked by index (`floor(count * N / 100)`) from the sorted samples; no
/// interpolation is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats {
    pub count: usize,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub min: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub max: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub mean: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub p50: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub p95: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub p99: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub std_dev: Duration,
}

impl Stats {
    pub fn from_samples(samples: SampleSet) -> Result<Self, BenchError> {
        aggregate(samples)
    }
}

/// Sorts the samples and reduces them to [`Stats`].
pub fn aggregate(samples: SampleSet) -> Result<Stats, BenchError> {
    if samples.is_empty() {
        return Err(BenchError::EmptyInput);
    }

    let mut sorted = samples.into_inner();
    sorted.sort_unstable();

    let count = sorted.len();
    let total_micros: u128 = sorted.iter().map(Duration::as_micros).sum();
    let mean = Duration::from_micros((total_micros / count as u128) as u64);

    let std_dev = if count > 1 {
        let micros: Vec<f64> = sorted.iter().map(|d| d.as_micros() as f64).collect();
        let std_dev = statistical::population_standard_deviation(&micros, None);
        if std_dev.is_finite() {
            Duration::from_micros(std_dev as u64)
        } else {
            Duration::ZERO
        }
    } else {
        Duration::ZERO
    };

    Ok(Stats {
        count,
        min: sorted[0],
        max: sorted[count - 1],
        mean,
        p50: sorted[percentile_index(count, P50)],
        p95: sorted[percentile_index(count, P95)],
        p99: sorted[percentile_index(count, P99)],
        std_dev,
    })
}

/// Index of the `percentile`th element in a sorted set of `count` samples.
///
/// `count` must be non-zero.
pub fn percentile_index(count: usize, percentile: u32) -> usize {
    let idx = (count as u128 * percentile as u128 / 100) as usize;
    idx.min(count.saturating_sub(1))
}

/// Outcome of a completed scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenarioResult {
    pub config: ScenarioConfig,
    pub stats: Stats,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationMicroSeconds<u64>"))]
    pub wall_clock: Duration,
    pub throughput: f64,
}

impl ScenarioResult {
    pub fn new(config: ScenarioConfig, stats: Stats, wall_clock: Duration) -> Self {
        let throughput = throughput(stats.count, wall_clock);
        Self {
            config,
            stats,
            wall_clock,
            throughput,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn count(&self) -> usize {
        self.stats.count
    }

    pub fn total_time(&self) -> Duration {
        self.wall_clock
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: count={}, total={}, throughput={:.0}/s, min={:?}, mean={:?}, p95={:?}, p99={:?}, max={:?}",
            self.config.name,
            self.stats.count,
            humantime::format_duration(self.wall_clock),
            self.throughput,
            self.stats.min,
            self.stats.mean,
            self.stats.p95,
            self.stats.p99,
            self.stats.max,
        )
    }
}

/// Operations per second over `elapsed`. A zero span reports zero rather than infinity.
pub fn throughput(ops: usize, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.;
    }
    ops as f64 / elapsed.as_secs_f64()
}
