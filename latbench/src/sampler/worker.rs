use super::partition::partition;
use super::timer::Timer;
use super::Workload;
use crate::delay::{DelaySource, NetworkDelay};
use latbench_core::{BenchError, DelayRange};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Work assigned to one worker thread.
#[derive(Debug)]
pub(crate) struct WorkerPlan {
    pub id: usize,
    pub range: Range<usize>,
    pub delay: Option<NetworkDelay>,
}

impl WorkerPlan {
    /// One plan per partition of `workload_size` over `workers`. With `delay` set, every plan
    /// gets its own generator from the source.
    pub fn partitioned(
        workload_size: usize,
        workers: usize,
        delay: Option<(DelayRange, &DelaySource)>,
    ) -> Result<Vec<Self>, BenchError> {
        partition(workload_size, workers)
            .into_iter()
            .enumerate()
            .map(|(id, range)| -> Result<Self, BenchError> {
                let delay = delay
                    .map(|(bounds, source)| source.for_worker(id, bounds))
                    .transpose()?;
                Ok(WorkerPlan { id, range, delay })
            })
            .collect()
    }

    /// Times every index of the range in order into a private buffer.
    ///
    /// Stops before the next invocation once `cancel` is raised. A workload error or a panic
    /// in the workload raises `cancel` itself so sibling workers stop early.
    pub fn run<W: Workload + ?Sized>(
        self,
        work: &W,
        cancel: &AtomicBool,
    ) -> Result<Vec<Duration>, BenchError> {
        let WorkerPlan {
            id,
            range,
            mut delay,
        } = self;
        let _unwind = CancelOnPanic(cancel);
        let mut buffer = Vec::with_capacity(range.len());
        let timer = Timer::start();

        for index in range.clone() {
            if cancel.load(Ordering::Relaxed) {
                trace!("Worker {id} cancelled at index {index}.");
                return Err(BenchError::Cancelled);
            }

            let start = Timer::start();
            if let Err(source) = work.call(index) {
                cancel.store(true, Ordering::Relaxed);
                return Err(BenchError::Workload { index, source });
            }
            if let Some(delay) = delay.as_mut() {
                delay.pause();
            }
            buffer.push(start.elapsed());
        }

        trace!("Worker {id} finished {}..{} in {timer}", range.start, range.end);
        Ok(buffer)
    }
}

/// Raises the cancel flag if the worker unwinds.
struct CancelOnPanic<'a>(&'a AtomicBool);

impl Drop for CancelOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.store(true, Ordering::Relaxed);
        }
    }
}
