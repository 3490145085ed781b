//! Units of work the CLI can measure.
use clap::ValueEnum;
use latbench::core::WorkloadError;
use latbench::Workload;
use std::hint::black_box;
use std::time::Duration;

const SPIN_ITERATIONS: usize = 1_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WorkloadKind {
    /// A single multiplication.
    #[default]
    Noop,
    /// A loop of 1000 multiplications.
    Spin,
    /// A blocking sleep of `--work-us` microseconds.
    Sleep,
}

#[derive(Debug, Clone, Copy)]
pub struct BuiltinWorkload {
    kind: WorkloadKind,
    sleep: Duration,
}

impl BuiltinWorkload {
    pub fn new(kind: WorkloadKind, work_us: u64) -> Self {
        Self {
            kind,
            sleep: Duration::from_micros(work_us),
        }
    }

    pub fn kind(&self) -> WorkloadKind {
        self.kind
    }
}

impl Workload for BuiltinWorkload {
    fn call(&self, index: usize) -> Result<(), WorkloadError> {
        match self.kind {
            WorkloadKind::Noop => {
                black_box(index.wrapping_mul(2));
            }
            WorkloadKind::Spin => {
                for i in 0..SPIN_ITERATIONS {
                    black_box(i.wrapping_mul(2));
                }
            }
            WorkloadKind::Sleep => std::thread::sleep(self.sleep),
        }
        Ok(())
    }
}
