use std::time::Duration;

/// Latencies recorded by one scenario run.
///
/// Only ever appended to while sampling. Aggregation consumes the set, so it cannot be touched
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    samples: Vec<Duration>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Records one sample, truncated to whole microseconds.
    pub fn push(&mut self, latency: Duration) {
        self.samples.push(truncate_micros(latency));
    }

    /// Appends a worker's private buffer, keeping its internal order.
    pub fn append_worker(&mut self, mut buffer: Vec<Duration>) {
        self.samples.extend(buffer.drain(..).map(truncate_micros));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Duration] {
        &self.samples
    }

    pub fn into_inner(self) -> Vec<Duration> {
        self.samples
    }
}

impl From<Vec<Duration>> for SampleSet {
    fn from(samples: Vec<Duration>) -> Self {
        let mut set = Self::with_capacity(samples.len());
        set.append_worker(samples);
        set
    }
}

impl FromIterator<Duration> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Duration>>(iter: I) -> Self {
        let mut set = Self::new();
        for latency in iter {
            set.push(latency);
        }
        set
    }
}

pub(crate) fn truncate_micros(dur: Duration) -> Duration {
    Duration::from_micros(dur.as_micros() as u64)
}
