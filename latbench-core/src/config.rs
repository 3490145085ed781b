use crate::BenchError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
#[cfg(feature = "serde")]
use serde_with::{serde_as, DurationMilliSeconds};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Concurrency shape a scenario is run under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScenarioMode {
    #[default]
    Sequential,
    Concurrent,
    SimulatedCluster,
}

impl fmt::Display for ScenarioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
            Self::SimulatedCluster => "cluster",
        };
        f.write_str(label)
    }
}

/// Inclusive range, in microseconds, that simulated network pauses are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DelayRange {
    pub low_us: u64,
    pub high_us: u64,
}

impl DelayRange {
    pub const fn new(low_us: u64, high_us: u64) -> Self {
        Self { low_us, high_us }
    }

    pub fn low(&self) -> Duration {
        Duration::from_micros(self.low_us)
    }

    pub fn high(&self) -> Duration {
        Duration::from_micros(self.high_us)
    }

    pub fn contains(&self, delay: Duration) -> bool {
        (self.low()..=self.high()).contains(&delay)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.low_us > self.high_us {
            return Err(BenchError::invalid_config(format!(
                "network delay range is inverted ({}us > {}us)",
                self.low_us, self.high_us
            )));
        }
        Ok(())
    }
}

impl fmt::Display for DelayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}us", self.low_us, self.high_us)
    }
}

/// Parses `LOW-HIGH` (microseconds), or a single value for a fixed pause.
impl FromStr for DelayRange {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim().trim_end_matches("us").parse::<u64>().map_err(|err| {
                BenchError::invalid_config(format!("invalid delay bound '{v}': {err}"))
            })
        };

        let range = match s.split_once('-') {
            Some((low, high)) => Self::new(parse(low)?, parse(high)?),
            None => {
                let fixed = parse(s)?;
                Self::new(fixed, fixed)
            }
        };
        range.validate()?;
        Ok(range)
    }
}

/// A single named benchmark configuration.
///
/// Built with [`ScenarioConfig::new`] and the chained setters; [`ScenarioConfig::validate`] is
/// checked by the runner before anything is sampled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenarioConfig {
    pub name: String,
    pub workload_size: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_concurrency"))]
    pub concurrency: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: ScenarioMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub network_delay: Option<DelayRange>,
    #[cfg_attr(feature = "serde", serde(rename = "deadline_ms"))]
    #[cfg_attr(feature = "serde", serde_as(as = "Option<DurationMilliSeconds<u64>>"))]
    pub deadline: Option<Duration>,
}

impl ScenarioConfig {
    pub fn new(name: &str, workload_size: usize) -> Self {
        Self {
            name: name.to_string(),
            workload_size,
            concurrency: 1,
            mode: ScenarioMode::Sequential,
            network_delay: None,
            deadline: None,
        }
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn mode(mut self, mode: ScenarioMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn sequential(self) -> Self {
        self.mode(ScenarioMode::Sequential)
    }

    pub fn concurrent(self, workers: usize) -> Self {
        self.mode(ScenarioMode::Concurrent).concurrency(workers)
    }

    /// Run across `nodes` workers, each pausing for a random delay after every invocation.
    pub fn simulated_cluster(self, nodes: usize, delay: DelayRange) -> Self {
        self.mode(ScenarioMode::SimulatedCluster)
            .concurrency(nodes)
            .network_delay(delay)
    }

    pub fn network_delay(mut self, delay: DelayRange) -> Self {
        self.network_delay = Some(delay);
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.workload_size == 0 {
            return Err(BenchError::invalid_config(format!(
                "scenario '{}' must declare workload_size > 0",
                self.name
            )));
        }
        if self.concurrency == 0 {
            return Err(BenchError::invalid_config(format!(
                "scenario '{}' must declare concurrency >= 1",
                self.name
            )));
        }
        if let Some(range) = self.network_delay {
            range.validate()?;
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(BenchError::invalid_config(format!(
                "scenario '{}' has a zero deadline",
                self.name
            )));
        }
        Ok(())
    }

    /// Number of workers actually spawned: one for sequential runs, and never more workers
    /// than there are invocations.
    pub fn effective_concurrency(&self) -> usize {
        match self.mode {
            ScenarioMode::Sequential => 1,
            ScenarioMode::Concurrent | ScenarioMode::SimulatedCluster => {
                self.concurrency.min(self.workload_size).max(1)
            }
        }
    }

    /// Delay applied per invocation. Only simulated cluster runs pause.
    pub fn effective_delay(&self) -> Option<DelayRange> {
        match self.mode {
            ScenarioMode::SimulatedCluster => self.network_delay,
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
fn default_concurrency() -> usize {
    1
}
