use std::time::Duration;
use thiserror::Error;

/// Boxed error returned by a unit of work.
pub type WorkloadError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Cannot aggregate an empty sample set.")]
    EmptyInput,

    #[error("Invalid scenario config: {0}")]
    InvalidConfig(String),

    #[error("Workload failed at index {index}: {source}")]
    Workload {
        index: usize,
        #[source]
        source: WorkloadError,
    },

    #[error("Scenario exceeded its deadline of {}", humanize(.0))]
    DeadlineExceeded(Duration),

    #[error("Worker {0} panicked.")]
    WorkerPanicked(usize),

    #[error("Worker stopped after another worker failed.")]
    Cancelled,
}

impl BenchError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns the original workload error, if this failure came from one.
    pub fn workload_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Workload { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

fn humanize(dur: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*dur)
}
