//! Simulated network delay for cluster scenarios.
//!
//! Every worker gets its own generator from a [`DelaySource`], so runs with the same seed draw
//! the same pauses and workers never share RNG state.
use latbench_core::{BenchError, DelayRange, DEFAULT_SEED};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type RngFactory = dyn Fn(usize) -> Box<dyn RngCore + Send> + Send + Sync;

/// Hands out one pseudo-random generator per worker.
#[derive(Clone)]
pub struct DelaySource {
    factory: Arc<RngFactory>,
}

impl DelaySource {
    /// `SmallRng` generators derived from `seed` and the worker index.
    pub fn seeded(seed: u64) -> Self {
        Self::from_fn(move |worker| -> Box<dyn RngCore + Send> {
            Box::new(SmallRng::seed_from_u64(worker_seed(seed, worker)))
        })
    }

    /// Custom generator per worker index. Used to plug in fixed sequences for tests.
    pub fn from_fn<F>(factory: F) -> Self
    where
        F: Fn(usize) -> Box<dyn RngCore + Send> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    pub fn for_worker(&self, worker: usize, range: DelayRange) -> Result<NetworkDelay, BenchError> {
        let rng = (self.factory.as_ref())(worker);
        NetworkDelay::new(range, rng)
    }
}

impl Default for DelaySource {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl fmt::Debug for DelaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelaySource").finish_non_exhaustive()
    }
}

fn worker_seed(base: u64, worker: usize) -> u64 {
    base ^ (worker as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Uniform pause generator owned by a single worker.
pub struct NetworkDelay {
    range: DelayRange,
    dist: Uniform<u64>,
    rng: Box<dyn RngCore + Send>,
}

impl NetworkDelay {
    pub fn new(range: DelayRange, rng: Box<dyn RngCore + Send>) -> Result<Self, BenchError> {
        range.validate()?;
        Ok(Self {
            range,
            dist: Uniform::new_inclusive(range.low_us, range.high_us),
            rng,
        })
    }

    pub fn range(&self) -> DelayRange {
        self.range
    }

    /// Draws the next pause without sleeping.
    pub fn next_delay(&mut self) -> Duration {
        Duration::from_micros(self.dist.sample(&mut self.rng))
    }

    /// Blocks the current thread for the next drawn pause and returns it.
    pub fn pause(&mut self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        delay
    }
}

impl fmt::Debug for NetworkDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkDelay")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
