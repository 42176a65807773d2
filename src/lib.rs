//! # MuxSim: Cell x Guide Count Matrix Simulation
//!
//! A module for simulating synthetic single-cell "cell x guide" UMI count
//! matrices, used for benchmarking demultiplexing algorithms in CRISPR
//! screening analysis.
//!
//! ## Overview
//!
//! MuxSim generates a population of cells where each cell carries zero, one,
//! or two guide identities, then distributes each cell's total UMI count
//! across all guides. It's designed for:
//! - Benchmarking guide demultiplexing methods with ground truth labels
//! - Studying the effect of null and doubly-transduced cells on assignment
//! - Testing analysis pipelines against controlled signal/background ratios
//!
//! ## Key Features
//!
//! - **Negative-binomial UMI totals** - Overdispersed per-cell sequencing depth
//! - **Null cells** - A configurable fraction of cells carry no guide
//! - **Dual assignments** - Doubly-transduced cells with two boosted guides
//! - **Exact count conservation** - Multinomial sampling preserves row totals
//! - **Reproducible** - Every instance owns its seeded random stream
//!
//! ## Example
//!
//! ```
//! use muxsim::{MuxSim, MuxSimConfig};
//!
//! # fn main() -> Result<(), muxsim::MuxSimError> {
//! let config = MuxSimConfig::default()
//!     .with_num_cells(1000)
//!     .with_num_guides(100)
//!     .with_random_state(42);
//!
//! let mut sim = MuxSim::new(config)?;
//! let counts = sim.sample()?;
//! assert_eq!(counts.dim(), (1000, 100));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`models`] - Configuration and summary statistics
//! - [`generator`] - The [`MuxSim`] generator itself
//! - [`sampling`] - Negative-binomial and multinomial samplers
//! - [`errors`] - Error types

pub mod consts;
pub mod errors;
pub mod generator;
pub mod models;
pub mod sampling;


// Re-export commonly used types
pub use errors::MuxSimError;
pub use generator::MuxSim;
pub use models::{MuxSimConfig, SimulationStats};
pub use sampling::NegativeBinomial;
