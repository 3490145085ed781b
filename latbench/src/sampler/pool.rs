use super::worker::WorkerPlan;
use super::Workload;
use latbench_core::{BenchError, SampleSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Runs each plan on its own blocking thread, waits for every one of them, then merges their
/// buffers in worker order.
///
/// Nothing is merged unless every worker succeeded. The first real failure wins over the
/// `Cancelled` errors it causes in sibling workers. Dropping the returned future raises
/// `cancel`, so workers stop once their current invocation returns.
pub(crate) async fn collect_partitioned<W: Workload>(
    work: &Arc<W>,
    plans: Vec<WorkerPlan>,
    cancel: &Arc<AtomicBool>,
) -> Result<SampleSet, BenchError> {
    let capacity: usize = plans.iter().map(|p| p.range.len()).sum();

    let handles: Vec<(usize, JoinHandle<Result<Vec<Duration>, BenchError>>)> = plans
        .into_iter()
        .map(|plan| {
            let id = plan.id;
            let work = work.clone();
            let cancel = cancel.clone();
            let handle = tokio::task::spawn_blocking(move || plan.run(work.as_ref(), &cancel));
            (id, handle)
        })
        .collect();
    let _stop = CancelOnDrop(cancel.clone());
    debug!("Spawned {} workers.", handles.len());

    let mut buffers = Vec::with_capacity(handles.len());
    let mut failure: Option<BenchError> = None;
    for (id, handle) in handles {
        let err = match handle.await {
            Ok(Ok(buffer)) => {
                buffers.push(buffer);
                continue;
            }
            Ok(Err(err)) => err,
            Err(join_err) => {
                error!("Worker {id} did not complete: {join_err}");
                BenchError::WorkerPanicked(id)
            }
        };

        cancel.store(true, Ordering::Relaxed);
        if matches!(failure, None | Some(BenchError::Cancelled)) {
            failure = Some(err);
        }
    }

    if let Some(err) = failure {
        return Err(err);
    }

    let mut samples = SampleSet::with_capacity(capacity);
    for buffer in buffers {
        samples.append_worker(buffer);
    }
    Ok(samples)
}

/// Raises the cancel flag once the pool stops waiting on its workers, whether they all joined
/// or the caller gave up on the scenario.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
