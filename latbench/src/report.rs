//! Where finished scenarios go.
use crate::scenario::ScenarioState;
use latbench_core::{BenchError, ScenarioConfig, ScenarioResult};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Terminal state of one scenario in a run.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub config: ScenarioConfig,
    pub state: ScenarioState,
    pub result: Result<ScenarioResult, BenchError>,
}

impl ScenarioOutcome {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn is_completed(&self) -> bool {
        self.state == ScenarioState::Completed
    }

    pub fn error(&self) -> Option<&BenchError> {
        self.result.as_ref().err()
    }
}

/// Consumer of scenario outcomes, called once per scenario in run order.
pub trait ReportSink {
    fn report(&mut self, outcome: &ScenarioOutcome);
}

impl<F> ReportSink for F
where
    F: FnMut(&ScenarioOutcome),
{
    fn report(&mut self, outcome: &ScenarioOutcome) {
        self(outcome)
    }
}

/// Writes every outcome to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, outcome: &ScenarioOutcome) {
        match &outcome.result {
            Ok(result) => info!("{result}"),
            Err(err) => error!("Scenario {} failed: {err}", outcome.name()),
        }
    }
}

/// Tally of a [`crate::ScenarioRunner::run_all`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &ScenarioOutcome) {
        if outcome.is_completed() {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.failed
    }

    pub fn all_completed(&self) -> bool {
        self.failed == 0
    }
}
