//! Console table and JSON report.
use crate::error::CliError;
use latbench::{ReportSink, ScenarioOutcome, ScenarioResult};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub mode: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ScenarioOutcome> for ReportEntry {
    fn from(outcome: &ScenarioOutcome) -> Self {
        Self {
            name: outcome.name().to_string(),
            mode: outcome.config.mode.to_string(),
            completed: outcome.is_completed(),
            result: outcome.result.as_ref().ok().cloned(),
            error: outcome.error().map(|err| err.to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct JsonReport {
    pub seed: Option<u64>,
    pub scenarios: Vec<ReportEntry>,
}

impl JsonReport {
    pub fn write(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| CliError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote report to {}", path.display());
        Ok(())
    }
}

/// Prints one table row per outcome and keeps an entry for the JSON report.
pub struct TableSink<O> {
    out: O,
    header_written: bool,
    report: JsonReport,
}

impl<O: Write> TableSink<O> {
    pub fn new(out: O, seed: Option<u64>) -> Self {
        Self {
            out,
            header_written: false,
            report: JsonReport {
                seed,
                scenarios: vec![],
            },
        }
    }

    pub fn into_report(self) -> JsonReport {
        self.report
    }

    fn write_row(&mut self, outcome: &ScenarioOutcome) -> std::io::Result<()> {
        if !self.header_written {
            writeln!(
                self.out,
                "{:<20} {:<10} {:>8} {:>12} {:>12} {:>8} {:>8} {:>8} {:>8} {:>8}",
                "scenario", "mode", "count", "total", "ops/s", "min", "mean", "p95", "p99", "max"
            )?;
            self.header_written = true;
        }

        match &outcome.result {
            Ok(res) => writeln!(
                self.out,
                "{:<20} {:<10} {:>8} {:>12} {:>12.0} {:>8} {:>8} {:>8} {:>8} {:>8}",
                res.name(),
                res.config.mode.to_string(),
                res.count(),
                humantime::format_duration(res.total_time()).to_string(),
                res.throughput,
                res.stats.min.as_micros(),
                res.stats.mean.as_micros(),
                res.stats.p95.as_micros(),
                res.stats.p99.as_micros(),
                res.stats.max.as_micros(),
            ),
            Err(err) => writeln!(
                self.out,
                "{:<20} {:<10} FAILED: {err}",
                outcome.name(),
                outcome.config.mode.to_string(),
            ),
        }
    }
}

impl<O: Write> ReportSink for TableSink<O> {
    fn report(&mut self, outcome: &ScenarioOutcome) {
        if let Err(err) = self.write_row(outcome) {
            warn!("Unable to write table row: {err}");
        }
        self.report.scenarios.push(ReportEntry::from(outcome));
    }
}
