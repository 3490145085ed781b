use crate::workload::WorkloadKind;
use clap::{Parser, ValueEnum};
use latbench::core::DEFAULT_NETWORK_DELAY;
use latbench::DelayRange;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SIZES: [usize; 3] = [1_000, 10_000, 100_000];
pub const DEFAULT_THREADS: [usize; 3] = [2, 4, 8];
pub const DEFAULT_PER_WORKER: usize = 10_000;
pub const DEFAULT_NODES: usize = 3;
pub const DEFAULT_PER_NODE: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    Sequential,
    Concurrent,
    Cluster,
}

/// Latency sampling harness.
///
/// Without `--config`, runs a sweep of sequential, concurrent and simulated cluster
/// scenarios. Use `RUST_LOG` to adjust log output.
#[derive(Parser, Debug, Clone)]
#[command(name = "latbench", version, about)]
pub struct LatbenchCli {
    /// JSON suite file (`{"seed": .., "scenarios": [..]}`). Replaces the sweep flags.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scenario kinds to sweep. Defaults to all of them.
    #[arg(short = 's', long = "scenario", value_enum)]
    pub scenarios: Vec<ScenarioKind>,

    /// Sequential workload sizes.
    #[arg(short = 'n', long = "size")]
    pub sizes: Vec<usize>,

    /// Worker counts for the concurrent sweep.
    #[arg(short = 't', long = "threads")]
    pub threads: Vec<usize>,

    /// Invocations per worker in concurrent scenarios.
    #[arg(long, default_value_t = DEFAULT_PER_WORKER)]
    pub per_worker: usize,

    /// Simulated cluster node count.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Invocations per simulated node.
    #[arg(long, default_value_t = DEFAULT_PER_NODE)]
    pub per_node: usize,

    /// Simulated network delay range, `LOW-HIGH` in microseconds (inclusive).
    #[arg(long, default_value_t = DEFAULT_NETWORK_DELAY)]
    pub delay_us: DelayRange,

    /// Seed for the simulated network delay.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = WorkloadKind::Noop)]
    pub workload: WorkloadKind,

    /// Sleep time of the `sleep` workload, in microseconds.
    #[arg(long, default_value_t = 100)]
    pub work_us: u64,

    /// Per-scenario deadline, e.g. `5s` or `250ms`.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub deadline: Option<Duration>,

    /// Write a JSON report of every scenario to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Serve Prometheus metrics on this address while the suite runs.
    #[arg(long)]
    pub prometheus: Option<SocketAddr>,
}

impl LatbenchCli {
    pub fn scenario_kinds(&self) -> Vec<ScenarioKind> {
        if self.scenarios.is_empty() {
            vec![
                ScenarioKind::Sequential,
                ScenarioKind::Concurrent,
                ScenarioKind::Cluster,
            ]
        } else {
            self.scenarios.clone()
        }
    }

    pub fn sizes(&self) -> Vec<usize> {
        or_default(&self.sizes, &DEFAULT_SIZES)
    }

    pub fn threads(&self) -> Vec<usize> {
        or_default(&self.threads, &DEFAULT_THREADS)
    }
}

fn or_default(given: &[usize], default: &[usize]) -> Vec<usize> {
    if given.is_empty() {
        default.to_vec()
    } else {
        given.to_vec()
    }
}
