pub const DEFAULT_NUM_CELLS: usize = 10_000;
pub const DEFAULT_NUM_GUIDES: usize = 100;

/// Negative-binomial shape parameter for per-cell UMI totals.
pub const DEFAULT_NB_N: f64 = 10.0;
/// Negative-binomial success probability for per-cell UMI totals.
pub const DEFAULT_NB_P: f64 = 0.1;

pub const DEFAULT_NULL_RATE: f64 = 0.3;
pub const DEFAULT_DUAL_RATE: f64 = 0.2;
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Boost factor applied to the assigned guide(s) during sampling.
pub const DEFAULT_SIGNAL: f64 = 10.0;
/// Per-guide base rate of the background frequency vector.
pub const DEFAULT_BACKGROUND: f64 = 0.01;
