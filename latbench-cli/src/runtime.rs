//! Drives a suite from the command line: resolve the scenarios, run them in order, print the
//! table and write the JSON report.
use crate::{
    cli::LatbenchCli,
    error::CliError,
    report::TableSink,
    suite::Suite,
    workload::BuiltinWorkload,
};
use clap::Parser;
use latbench::{RunSummary, ScenarioRunner};
use std::io::Write;
#[allow(unused)]
use tracing::{debug, error, info, instrument, warn};

/// Command line runtime.
///
/// # Example
///
/// ```no_run
/// use latbench_cli::LatbenchRuntime;
///
/// #[tokio::main]
/// async fn main() {
///     let summary = LatbenchRuntime::new().with_args().run().await.unwrap();
///     assert!(summary.all_completed());
/// }
/// ```
pub struct LatbenchRuntime<O = std::io::Stdout> {
    cli: LatbenchCli,
    out: O,
}

impl Default for LatbenchRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl LatbenchRuntime {
    pub fn new() -> Self {
        Self::from_cli(LatbenchCli::parse_from(["latbench"]))
    }

    pub fn from_cli(cli: LatbenchCli) -> Self {
        Self {
            cli,
            out: std::io::stdout(),
        }
    }

    /// Use the process arguments. See `latbench --help`.
    pub fn with_args(mut self) -> Self {
        self.cli = LatbenchCli::parse();
        self
    }
}

impl<O: Write> LatbenchRuntime<O> {
    /// Table rows go to `out` instead of stdout.
    pub fn output<T: Write>(self, out: T) -> LatbenchRuntime<T> {
        LatbenchRuntime { cli: self.cli, out }
    }

    pub fn cli(&self) -> &LatbenchCli {
        &self.cli
    }

    #[instrument(name = "latbench", skip_all, fields(workload = ?self.cli.workload))]
    pub async fn run(self) -> Result<RunSummary, CliError> {
        let suite = Suite::resolve(&self.cli)?;
        info!("Running {} scenarios.", suite.scenarios.len());

        let work = BuiltinWorkload::new(self.cli.workload, self.cli.work_us);
        let mut runner = ScenarioRunner::new(work);
        if let Some(seed) = suite.seed {
            runner = runner.seed(seed);
        }

        let mut sink = TableSink::new(self.out, suite.seed);
        let summary = runner.run_all(suite.scenarios, &mut sink).await;
        info!("Finished: {} completed, {} failed.", summary.completed, summary.failed);

        if let Some(path) = &self.cli.json {
            sink.into_report().write(path)?;
        }
        Ok(summary)
    }
}
