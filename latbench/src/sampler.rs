//! Per-invocation timing of a unit of work.
mod partition;
pub(crate) mod pool;
pub(crate) mod timer;
pub(crate) mod worker;

pub use partition::partition;

use latbench_core::{BenchError, SampleSet, WorkloadError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use worker::WorkerPlan;

/// The unit of work being measured.
///
/// Implemented for every `Fn(usize) -> Result<(), E>` whose error converts into a boxed
/// [`std::error::Error`], so plain closures can be used directly.
pub trait Workload: Send + Sync + 'static {
    fn call(&self, index: usize) -> Result<(), WorkloadError>;
}

impl<F, E> Workload for F
where
    F: Fn(usize) -> Result<(), E> + Send + Sync + 'static,
    E: Into<WorkloadError>,
{
    fn call(&self, index: usize) -> Result<(), WorkloadError> {
        self(index).map_err(Into::into)
    }
}

/// Invokes `work` once for every index in `[0, workload_size)`, in order, on the calling
/// thread.
///
/// A workload error is returned as-is and the samples taken so far are dropped.
pub fn collect<W: Workload + ?Sized>(
    workload_size: usize,
    work: &W,
) -> Result<SampleSet, BenchError> {
    let plan = WorkerPlan {
        id: 0,
        range: 0..workload_size,
        delay: None,
    };
    let buffer = plan.run(work, &AtomicBool::new(false))?;
    Ok(SampleSet::from(buffer))
}

/// Like [`collect`], but split over `concurrency` blocking threads (see [`partition`]).
///
/// Must be called from within a tokio runtime.
pub async fn collect_concurrent<W: Workload>(
    workload_size: usize,
    concurrency: usize,
    work: Arc<W>,
) -> Result<SampleSet, BenchError> {
    let plans = WorkerPlan::partitioned(workload_size, concurrency, None)?;
    pool::collect_partitioned(&work, plans, &Arc::new(AtomicBool::new(false))).await
}
