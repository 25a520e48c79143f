//! Solver configuration: validated input scalars.

pub mod options;
pub use options::{SolverConfig, DEFAULT_BANDWIDTH, DEFAULT_SEED};
