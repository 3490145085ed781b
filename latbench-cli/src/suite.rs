//! Scenario suites: loaded from JSON or built from the sweep flags.
use crate::cli::{LatbenchCli, ScenarioKind};
use crate::error::CliError;
use latbench::ScenarioConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub seed: Option<u64>,
    pub scenarios: Vec<ScenarioConfig>,
}

impl Suite {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CliError::SuiteRead {
            path: path.to_path_buf(),
            source,
        })?;
        let suite = Self::from_json(&raw)?;
        info!(
            "Loaded {} scenarios from {}",
            suite.scenarios.len(),
            path.display()
        );
        Ok(suite)
    }

    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        let suite: Self = serde_json::from_str(raw)?;
        if suite.scenarios.is_empty() {
            return Err(CliError::EmptySuite);
        }
        Ok(suite)
    }

    /// Sweep described by the CLI flags. With no flags this is the stock sweep: sequential
    /// sizes 1000/10000/100000, 2/4/8 workers of 10000 invocations each, and a 3 node cluster
    /// of 5000 invocations per node.
    pub fn from_cli(cli: &LatbenchCli) -> Self {
        let mut scenarios = vec![];
        for kind in cli.scenario_kinds() {
            match kind {
                ScenarioKind::Sequential => {
                    scenarios.extend(
                        cli.sizes()
                            .into_iter()
                            .map(|n| ScenarioConfig::new(&format!("sequential_{n}"), n)),
                    );
                }
                ScenarioKind::Concurrent => {
                    scenarios.extend(cli.threads().into_iter().map(|t| {
                        ScenarioConfig::new(&format!("threads_{t}"), t * cli.per_worker)
                            .concurrent(t)
                    }));
                }
                ScenarioKind::Cluster => {
                    scenarios.push(
                        ScenarioConfig::new(
                            &format!("cluster_{}", cli.nodes),
                            cli.nodes * cli.per_node,
                        )
                        .simulated_cluster(cli.nodes, cli.delay_us),
                    );
                }
            }
        }

        Self {
            seed: cli.seed,
            scenarios,
        }
        .with_deadline(cli.deadline)
    }

    /// Resolves the suite a CLI invocation runs. `--seed` overrides the file's seed and
    /// `--deadline` fills in scenarios that do not set their own.
    pub fn resolve(cli: &LatbenchCli) -> Result<Self, CliError> {
        let Some(path) = &cli.config else {
            return Ok(Self::from_cli(cli));
        };

        let mut suite = Self::load(path)?.with_deadline(cli.deadline);
        if cli.seed.is_some() {
            suite.seed = cli.seed;
        }
        Ok(suite)
    }

    fn with_deadline(mut self, deadline: Option<std::time::Duration>) -> Self {
        if let Some(deadline) = deadline {
            for config in self.scenarios.iter_mut().filter(|c| c.deadline.is_none()) {
                config.deadline = Some(deadline);
            }
        }
        self
    }
}
