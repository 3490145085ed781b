use crate::DelayRange;

/// Seed used for the simulated network delay when none is supplied.
pub const DEFAULT_SEED: u64 = 0x1A7B_E4C8;

/// Round-trip pause injected by simulated cluster scenarios, in microseconds.
pub const DEFAULT_NETWORK_DELAY: DelayRange = DelayRange {
    low_us: 100,
    high_us: 499,
};

pub const P50: u32 = 50;
pub const P95: u32 = 95;
pub const P99: u32 = 99;
