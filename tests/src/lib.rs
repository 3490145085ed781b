//! Workloads shared by the integration tests.
use latbench::core::WorkloadError;
use latbench::Workload;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every index it is called with, in call order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<usize>>>,
    calls: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn seen(&self) -> Vec<usize> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    pub fn seen_sorted(&self) -> Vec<usize> {
        let mut seen = self.seen();
        seen.sort_unstable();
        seen
    }
}

impl Workload for Recorder {
    fn call(&self, index: usize) -> Result<(), WorkloadError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.seen.lock().map_err(|_| "recorder poisoned")?.push(index);
        Ok(())
    }
}

/// Fails at one index with an [`IndexError`].
#[derive(Debug, Clone, Copy)]
pub struct FailAt(pub usize);

#[derive(Debug, PartialEq, Eq)]
pub struct IndexError(pub usize);

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "refused index {}", self.0)
    }
}

impl std::error::Error for IndexError {}

impl Workload for FailAt {
    fn call(&self, index: usize) -> Result<(), WorkloadError> {
        if index == self.0 {
            return Err(Box::new(IndexError(index)));
        }
        Ok(())
    }
}

/// Blocks for a fixed time on every call.
#[derive(Debug, Clone, Copy)]
pub struct Sleeper(pub Duration);

impl Workload for Sleeper {
    fn call(&self, _index: usize) -> Result<(), WorkloadError> {
        std::thread::sleep(self.0);
        Ok(())
    }
}
