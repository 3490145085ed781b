//! Scenario logic
use crate::delay::DelaySource;
use crate::report::{ReportSink, RunSummary, ScenarioOutcome};
use crate::sampler::pool::collect_partitioned;
use crate::sampler::timer::Timer;
use crate::sampler::worker::WorkerPlan;
use crate::sampler::Workload;
use crate::telemetry;
use futures_util::stream::{self, Stream, StreamExt};
use latbench_core::{aggregate, BenchError, ScenarioConfig, ScenarioMode, ScenarioResult};
use std::{
    future::Future,
    pin::{pin, Pin},
    sync::{atomic::AtomicBool, Arc},
    task::{ready, Context, Poll},
};
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn};

/// Lifecycle of a single [`Scenario`]. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Pending,
    Running,
    Completed,
    Failed,
}

type RunnerFuture = Pin<Box<dyn Future<Output = Result<ScenarioResult, BenchError>> + Send>>;

/// A scenario run, resolved by awaiting it.
///
/// Nothing happens until the first poll. Created through [`ScenarioRunner`].
pub struct Scenario<W> {
    work: Arc<W>,
    config: ScenarioConfig,
    delays: DelaySource,
    runner_fut: Option<RunnerFuture>,
    state: ScenarioState,
}

impl<W: Workload> Scenario<W> {
    fn new(work: Arc<W>, config: ScenarioConfig, delays: DelaySource) -> Self {
        Self {
            work,
            config,
            delays,
            runner_fut: None,
            state: ScenarioState::Pending,
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// Drives the scenario to completion and packages the result with its final state.
    pub async fn into_outcome(mut self) -> ScenarioOutcome {
        let result = (&mut self).await;
        ScenarioOutcome {
            config: self.config,
            state: self.state,
            result,
        }
    }
}

impl<W: Workload> Future for Scenario<W> {
    type Output = Result<ScenarioResult, BenchError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.runner_fut.is_none() {
            let fut = run_scenario(
                self.work.clone(),
                self.config.clone(),
                self.delays.clone(),
            );
            self.runner_fut = Some(Box::pin(fut));
            self.set_state(ScenarioState::Running);
        }

        let res = if let Some(runner) = &mut self.runner_fut {
            ready!(runner.as_mut().poll(cx))
        } else {
            unreachable!()
        };

        telemetry::record_outcome(&self.config.name, &res);
        self.set_state(if res.is_ok() {
            ScenarioState::Completed
        } else {
            ScenarioState::Failed
        });
        Poll::Ready(res)
    }
}

impl<W> Scenario<W> {
    fn set_state(&mut self, state: ScenarioState) {
        debug!("Scenario {} {:?} -> {:?}", self.config.name, self.state, state);
        self.state = state;
    }
}

/// Runs scenarios against one shared unit of work.
///
/// Every run starts from scratch: no samples, generators or state carry over from earlier
/// runs, so a runner (and the sequence passed to [`ScenarioRunner::outcomes`]) can be reused
/// freely.
///
/// # Example
/// ```no_run
/// use latbench::prelude::*;
/// use std::convert::Infallible;
///
/// #[tokio::main]
/// async fn main() {
///     let runner = ScenarioRunner::new(|idx: usize| {
///         std::hint::black_box(idx * 2);
///         Ok::<_, Infallible>(())
///     });
///
///     let result = runner
///         .run_concurrent(ScenarioConfig::new("threads_4", 40_000).concurrency(4))
///         .await
///         .unwrap();
///     println!("{result}");
/// }
/// ```
pub struct ScenarioRunner<W> {
    work: Arc<W>,
    delays: DelaySource,
}

impl<W> Clone for ScenarioRunner<W> {
    fn clone(&self) -> Self {
        Self {
            work: self.work.clone(),
            delays: self.delays.clone(),
        }
    }
}

impl<W: Workload> ScenarioRunner<W> {
    pub fn new(work: W) -> Self {
        Self::from_arc(Arc::new(work))
    }

    pub fn from_arc(work: Arc<W>) -> Self {
        Self {
            work,
            delays: DelaySource::default(),
        }
    }

    /// Seed for the simulated network delay generators.
    pub fn seed(self, seed: u64) -> Self {
        self.delay_source(DelaySource::seeded(seed))
    }

    pub fn delay_source(mut self, delays: DelaySource) -> Self {
        self.delays = delays;
        self
    }

    /// Runs `config` in the shape its `mode` names.
    pub fn run(&self, config: ScenarioConfig) -> Scenario<W> {
        Scenario::new(self.work.clone(), config, self.delays.clone())
    }

    /// Single worker, indices in increasing order. `concurrency` is ignored.
    pub fn run_sequential(&self, config: ScenarioConfig) -> Scenario<W> {
        self.run(config.mode(ScenarioMode::Sequential))
    }

    pub fn run_concurrent(&self, config: ScenarioConfig) -> Scenario<W> {
        self.run(config.mode(ScenarioMode::Concurrent))
    }

    /// Concurrent run where every invocation is followed by a pause drawn from the config's
    /// network delay range. The pause is part of the recorded sample.
    pub fn run_simulated_cluster(&self, config: ScenarioConfig) -> Scenario<W> {
        self.run(config.mode(ScenarioMode::SimulatedCluster))
    }

    /// One outcome per config, in input order. A failed scenario does not stop the ones after
    /// it.
    pub fn outcomes<I>(&self, configs: I) -> impl Stream<Item = ScenarioOutcome> + '_
    where
        I: IntoIterator<Item = ScenarioConfig>,
        I::IntoIter: 'static,
    {
        stream::iter(configs).then(move |config| self.run(config).into_outcome())
    }

    /// Runs every config in order, handing each outcome to `sink`.
    pub async fn run_all<I, S>(&self, configs: I, sink: &mut S) -> RunSummary
    where
        I: IntoIterator<Item = ScenarioConfig>,
        I::IntoIter: 'static,
        S: ReportSink + ?Sized,
    {
        let mut summary = RunSummary::default();
        let mut outcomes = pin!(self.outcomes(configs));
        while let Some(outcome) = outcomes.next().await {
            summary.record(&outcome);
            sink.report(&outcome);
        }
        summary
    }
}

#[instrument(name = "scenario", skip_all, fields(name = %config.name, mode = %config.mode))]
async fn run_scenario<W: Workload>(
    work: Arc<W>,
    config: ScenarioConfig,
    delays: DelaySource,
) -> Result<ScenarioResult, BenchError> {
    if let Err(err) = config.validate() {
        error!("Rejected config: {err}");
        return Err(err);
    }
    info!("Running {} with config {:?}", config.name, &config);

    let plans = WorkerPlan::partitioned(
        config.workload_size,
        config.effective_concurrency(),
        config.effective_delay().map(|range| (range, &delays)),
    )?;

    let cancel = Arc::new(AtomicBool::new(false));
    let timer = Timer::start();
    let collection = collect_partitioned(&work, plans, &cancel);
    let samples = match config.deadline {
        Some(deadline) => match tokio::time::timeout(deadline, collection).await {
            Ok(samples) => samples,
            Err(_) => {
                warn!("Deadline exceeded, abandoning outstanding workers.");
                Err(BenchError::DeadlineExceeded(deadline))
            }
        },
        None => collection.await,
    };
    let wall_clock = timer.elapsed();

    let samples = match samples {
        Ok(samples) => samples,
        Err(err) => {
            error!("Scenario failed: {err}");
            return Err(err);
        }
    };
    debug!("Collected {} samples in {timer}", samples.len());

    telemetry::record_samples(&config.name, &samples);
    let stats = aggregate(samples)?;
    let result = ScenarioResult::new(config, stats, wall_clock);

    info!("Scenario complete");
    Ok(result)
}
