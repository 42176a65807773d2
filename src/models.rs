use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{
    DEFAULT_DUAL_RATE, DEFAULT_NB_N, DEFAULT_NB_P, DEFAULT_NULL_RATE, DEFAULT_NUM_CELLS,
    DEFAULT_NUM_GUIDES, DEFAULT_RANDOM_STATE,
};
use crate::errors::MuxSimError;
use crate::generator::MuxSim;

// ============================================================================
// Configuration Model
// ============================================================================

/// Configuration for a cell x guide simulation
///
/// Controls the population size, the UMI depth distribution, and the rates
/// of null and doubly-transduced cells.
///
/// # Example
/// ```
/// use muxsim::MuxSimConfig;
///
/// let config = MuxSimConfig::default()
///     .with_num_cells(1000)
///     .with_null_rate(0.1)
///     .with_random_state(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuxSimConfig {
    /// Number of simulated cells (rows of the output matrix)
    pub num_cells: usize,
    /// Number of guides (columns of the output matrix)
    pub num_guides: usize,
    /// Negative-binomial shape parameter for UMI totals
    pub n: f64,
    /// Negative-binomial success probability for UMI totals
    pub p: f64,
    /// Fraction of cells carrying no guide identity (0.0-1.0)
    pub null_rate: f64,
    /// Fraction of assigned cells carrying a second guide (0.0-1.0)
    pub dual_rate: f64,
    /// Seed for the generator's owned random stream
    pub random_state: u64,
}

impl Default for MuxSimConfig {
    fn default() -> Self {
        Self {
            num_cells: DEFAULT_NUM_CELLS,
            num_guides: DEFAULT_NUM_GUIDES,
            n: DEFAULT_NB_N,
            p: DEFAULT_NB_P,
            null_rate: DEFAULT_NULL_RATE,
            dual_rate: DEFAULT_DUAL_RATE,
            random_state: DEFAULT_RANDOM_STATE,
        }
    }
}

impl MuxSimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_cells(mut self, num_cells: usize) -> Self {
        self.num_cells = num_cells;
        self
    }

    pub fn with_num_guides(mut self, num_guides: usize) -> Self {
        self.num_guides = num_guides;
        self
    }

    pub fn with_umi_distribution(mut self, n: f64, p: f64) -> Self {
        self.n = n;
        self.p = p;
        self
    }

    pub fn with_null_rate(mut self, null_rate: f64) -> Self {
        self.null_rate = null_rate;
        self
    }

    pub fn with_dual_rate(mut self, dual_rate: f64) -> Self {
        self.dual_rate = dual_rate;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Validate all parameters, failing eagerly before any state is built
    pub fn validate(&self) -> Result<(), MuxSimError> {
        if self.num_cells == 0 {
            return Err(MuxSimError::InvalidParameter(
                "num_cells must be positive".to_string(),
            ));
        }
        if self.num_guides == 0 {
            return Err(MuxSimError::InvalidParameter(
                "num_guides must be positive".to_string(),
            ));
        }
        if !self.n.is_finite() || self.n <= 0.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "n must be a positive finite value, got {}",
                self.n
            )));
        }
        if !self.p.is_finite() || self.p <= 0.0 || self.p > 1.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "p must be in (0, 1], got {}",
                self.p
            )));
        }
        if !self.null_rate.is_finite() || !(0.0..=1.0).contains(&self.null_rate) {
            return Err(MuxSimError::InvalidParameter(format!(
                "null_rate must be in [0, 1], got {}",
                self.null_rate
            )));
        }
        if !self.dual_rate.is_finite() || !(0.0..=1.0).contains(&self.dual_rate) {
            return Err(MuxSimError::InvalidParameter(format!(
                "dual_rate must be in [0, 1], got {}",
                self.dual_rate
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Summary statistics over a constructed generator
///
/// Counts the assignment classes of the simulated population and summarizes
/// the UMI depth distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_cells: usize,
    pub total_guides: usize,
    pub null_cells: usize,
    pub single_cells: usize,
    pub dual_cells: usize,
    pub mean_umi: f64,
    pub median_umi: f64,
    pub min_umi: u64,
    pub max_umi: u64,
}

impl SimulationStats {
    pub fn from_generator(sim: &MuxSim) -> Self {
        let total_cells = sim.num_cells();

        let mut umi_sums: Vec<u64> = sim.umi_sums().iter().copied().collect();
        umi_sums.sort_unstable();

        let median_umi = if total_cells % 2 == 0 {
            let mid = total_cells / 2;
            (umi_sums[mid - 1] + umi_sums[mid]) as f64 / 2.0
        } else {
            umi_sums[total_cells / 2] as f64
        };

        Self {
            total_cells,
            total_guides: sim.num_guides(),
            null_cells: sim.mask_null().iter().filter(|&&m| m).count(),
            single_cells: sim.mask_single().iter().filter(|&&m| m).count(),
            dual_cells: sim.mask_dual().iter().filter(|&&m| m).count(),
            mean_umi: sim.mean_umi(),
            median_umi,
            min_umi: *umi_sums.first().unwrap_or(&0),
            max_umi: *umi_sums.last().unwrap_or(&0),
        }
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Statistics ===")?;
        writeln!(f, "Total cells: {}", self.total_cells)?;
        writeln!(f, "Total guides: {}", self.total_guides)?;
        writeln!(f, "Null cells: {}", self.null_cells)?;
        writeln!(f, "Single-assigned cells: {}", self.single_cells)?;
        writeln!(f, "Dual-assigned cells: {}", self.dual_cells)?;
        writeln!(f, "UMI totals per cell:")?;
        writeln!(f, "  Mean: {:.2}", self.mean_umi)?;
        writeln!(f, "  Median: {:.2}", self.median_umi)?;
        writeln!(f, "  Min: {}", self.min_umi)?;
        write!(f, "  Max: {}", self.max_umi)
    }
}
