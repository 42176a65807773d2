use ndarray::{Array1, Array2, Zip};
use rand::distributions::{Bernoulli, Distribution, Uniform};
use rand::prelude::*;
use rayon::prelude::*;
use std::fmt;

use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_SIGNAL};
use crate::errors::MuxSimError;
use crate::models::MuxSimConfig;
use crate::sampling::{
    background_frequencies, guide_frequencies, sample_multinomial, NegativeBinomial,
};

/// Generator for synthetic cell x guide count matrices
///
/// Construction runs the full assignment pipeline from a single owned seeded
/// random stream, in a fixed order: UMI totals, null flags, primary
/// assignments, dual assignments. The resulting arrays are frozen; the only
/// operation that consumes further randomness is [`MuxSim::sample`], which
/// produces a fresh count matrix on every call.
///
/// All per-cell state is held in parallel arrays indexed by cell id.
/// Assignments use `-1` as the "no guide" sentinel; a `-1` primary
/// assignment is produced only by overwriting the uniformly-drawn guide of a
/// cell whose null flag came up 1.
///
/// # Example
/// ```
/// use muxsim::{MuxSim, MuxSimConfig};
///
/// # fn main() -> Result<(), muxsim::MuxSimError> {
/// let mut sim = MuxSim::new(MuxSimConfig::default().with_num_cells(500))?;
/// let counts = sim.sample()?;
///
/// for (row, &total) in counts.outer_iter().zip(sim.umi_sums().iter()) {
///     assert_eq!(row.sum(), total);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MuxSim {
    config: MuxSimConfig,
    rng: StdRng,

    umi_sums: Array1<u64>,
    null_assignments: Array1<u8>,
    assignments: Array1<i64>,
    dual_assignments: Array1<i64>,

    mask_null: Array1<bool>,
    mask_dual: Array1<bool>,
    mask_assignment: Array1<bool>,
    mask_single: Array1<bool>,

    mean_umi: f64,
}

impl MuxSim {
    /// Build a generator from a validated configuration
    ///
    /// Fails with [`MuxSimError::InvalidParameter`] before any state is
    /// generated if the configuration is out of range.
    pub fn new(config: MuxSimConfig) -> Result<Self, MuxSimError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.random_state);

        let umi_sums = Self::gen_umi_sums(&config, &mut rng)?;
        let null_assignments = Self::gen_null_assignments(&config, &mut rng)?;
        let assignments = Self::gen_assignments(&config, &null_assignments, &mut rng);
        let dual_assignments = Self::gen_dual_assignments(&config, &assignments, &mut rng)?;

        let mask_null = null_assignments.mapv(|v| v == 1);
        let mask_dual = dual_assignments.mapv(|v| v != -1);
        let mask_assignment = assignments.mapv(|v| v != -1);
        let mask_single = Zip::from(&mask_assignment)
            .and(&mask_dual)
            .map_collect(|&assigned, &dual| assigned && !dual);

        let mean_umi =
            umi_sums.iter().map(|&v| v as f64).sum::<f64>() / config.num_cells as f64;

        Ok(Self {
            config,
            rng,
            umi_sums,
            null_assignments,
            assignments,
            dual_assignments,
            mask_null,
            mask_dual,
            mask_assignment,
            mask_single,
            mean_umi,
        })
    }

    /// Build a generator with the default configuration
    pub fn with_defaults() -> Result<Self, MuxSimError> {
        Self::new(MuxSimConfig::default())
    }

    /// Per-cell UMI totals from the negative-binomial depth distribution
    fn gen_umi_sums(config: &MuxSimConfig, rng: &mut StdRng) -> Result<Array1<u64>, MuxSimError> {
        let depth = NegativeBinomial::new(config.n, config.p)?;
        Ok((0..config.num_cells).map(|_| depth.sample(rng)).collect())
    }

    /// Per-cell Bernoulli null flags, drawn independently of guide choice
    fn gen_null_assignments(
        config: &MuxSimConfig,
        rng: &mut StdRng,
    ) -> Result<Array1<u8>, MuxSimError> {
        let null_flag = Bernoulli::new(config.null_rate).map_err(|_| {
            MuxSimError::InvalidParameter(format!(
                "null_rate must be in [0, 1], got {}",
                config.null_rate
            ))
        })?;
        Ok((0..config.num_cells)
            .map(|_| null_flag.sample(rng) as u8)
            .collect())
    }

    /// Primary guide per cell: a uniform draw for every cell, then null
    /// cells overwritten with -1
    ///
    /// The draw-then-overwrite order keeps the null decision independent of
    /// the guide a cell would otherwise have received, and keeps the stream
    /// consumption order stable under a fixed seed.
    fn gen_assignments(
        config: &MuxSimConfig,
        null_assignments: &Array1<u8>,
        rng: &mut StdRng,
    ) -> Array1<i64> {
        let guide = Uniform::from(0..config.num_guides as i64);
        let mut assignments: Array1<i64> =
            (0..config.num_cells).map(|_| guide.sample(rng)).collect();

        for (assignment, &flag) in assignments.iter_mut().zip(null_assignments.iter()) {
            if flag == 1 {
                *assignment = -1;
            }
        }
        assignments
    }

    /// Secondary guide per cell
    ///
    /// Candidates are the cells with a non-null primary assignment. One
    /// Bernoulli(dual_rate) is drawn per candidate; a secondary guide pool
    /// is drawn for every cell; then the pool entry is forced to -1 for
    /// every null cell and every candidate that stays single-only.
    fn gen_dual_assignments(
        config: &MuxSimConfig,
        assignments: &Array1<i64>,
        rng: &mut StdRng,
    ) -> Result<Array1<i64>, MuxSimError> {
        let candidates: Vec<usize> = assignments
            .iter()
            .enumerate()
            .filter(|(_, &a)| a != -1)
            .map(|(idx, _)| idx)
            .collect();

        let dual_flag = Bernoulli::new(config.dual_rate).map_err(|_| {
            MuxSimError::InvalidParameter(format!(
                "dual_rate must be in [0, 1], got {}",
                config.dual_rate
            ))
        })?;
        let single_only: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|_| !dual_flag.sample(rng))
            .collect();

        let guide = Uniform::from(0..config.num_guides as i64);
        let mut secondary: Array1<i64> =
            (0..config.num_cells).map(|_| guide.sample(rng)).collect();

        for (dual, &primary) in secondary.iter_mut().zip(assignments.iter()) {
            if primary == -1 {
                *dual = -1;
            }
        }
        for &idx in &single_only {
            secondary[idx] = -1;
        }

        Ok(secondary)
    }

    /// Sample a count matrix with the default signal and background
    pub fn sample(&mut self) -> Result<Array2<u64>, MuxSimError> {
        self.sample_with(DEFAULT_SIGNAL, DEFAULT_BACKGROUND)
    }

    /// Sample a `num_cells x num_guides` count matrix
    ///
    /// Each row is an independent multinomial draw with that cell's UMI
    /// total as the trial count, so row sums reproduce `umi_sums` exactly.
    /// Assigned cells concentrate counts on their boosted guide(s); null
    /// cells spread counts uniformly.
    ///
    /// Cells are sampled in parallel with per-cell streams seeded from a
    /// fresh draw on the generator's own stream, so repeated calls produce
    /// independent matrices while staying deterministic for a fixed
    /// `random_state`.
    pub fn sample_with(
        &mut self,
        signal: f64,
        background: f64,
    ) -> Result<Array2<u64>, MuxSimError> {
        if !signal.is_finite() || signal <= 0.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "signal must be a positive finite value, got {signal}"
            )));
        }
        if !background.is_finite() || background <= 0.0 {
            return Err(MuxSimError::InvalidParameter(format!(
                "background must be a positive finite value, got {background}"
            )));
        }

        let num_cells = self.config.num_cells;
        let num_guides = self.config.num_guides;
        let base = background_frequencies(background, num_guides);
        let call_seed: u64 = self.rng.gen();

        let umi_sums = &self.umi_sums;
        let assignments = &self.assignments;
        let dual_assignments = &self.dual_assignments;

        let rows: Result<Vec<Vec<u64>>, MuxSimError> = (0..num_cells)
            .into_par_iter()
            .map(|cell_idx| {
                let mut rng = StdRng::seed_from_u64(call_seed.wrapping_add(cell_idx as u64));
                let freqs = guide_frequencies(
                    &base,
                    assignments[cell_idx],
                    dual_assignments[cell_idx],
                    signal,
                    background,
                );
                sample_multinomial(umi_sums[cell_idx], &freqs, &mut rng)
            })
            .collect();

        let flat: Vec<u64> = rows?.into_iter().flatten().collect();
        Array2::from_shape_vec((num_cells, num_guides), flat)
            .map_err(|e| MuxSimError::ShapeMismatch(e.to_string()))
    }

    pub fn config(&self) -> &MuxSimConfig {
        &self.config
    }

    pub fn num_cells(&self) -> usize {
        self.config.num_cells
    }

    pub fn num_guides(&self) -> usize {
        self.config.num_guides
    }

    /// Total UMI count per cell
    pub fn umi_sums(&self) -> &Array1<u64> {
        &self.umi_sums
    }

    /// Bernoulli null flags per cell (1 = null)
    pub fn null_assignments(&self) -> &Array1<u8> {
        &self.null_assignments
    }

    /// Primary guide per cell, -1 for null cells
    pub fn assignments(&self) -> &Array1<i64> {
        &self.assignments
    }

    /// Secondary guide per cell, -1 when absent
    pub fn dual_assignments(&self) -> &Array1<i64> {
        &self.dual_assignments
    }

    pub fn mask_null(&self) -> &Array1<bool> {
        &self.mask_null
    }

    pub fn mask_dual(&self) -> &Array1<bool> {
        &self.mask_dual
    }

    pub fn mask_assignment(&self) -> &Array1<bool> {
        &self.mask_assignment
    }

    pub fn mask_single(&self) -> &Array1<bool> {
        &self.mask_single
    }

    /// Arithmetic mean of the per-cell UMI totals
    pub fn mean_umi(&self) -> f64 {
        self.mean_umi
    }
}

impl fmt::Display for MuxSim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MuxSim(num_cells={}, num_guides={}, n={}, p={}, null_rate={}, dual_rate={}, random_state={}, mean_umi={:.2})",
            self.config.num_cells,
            self.config.num_guides,
            self.config.n,
            self.config.p,
            self.config.null_rate,
            self.config.dual_rate,
            self.config.random_state,
            self.mean_umi,
        )
    }
}
