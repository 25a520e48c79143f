//! Test-system pipeline: generation, symmetrization and D/L/U extraction.

pub mod decompose;
pub mod generator;
pub mod symmetrize;

pub use decompose::{decompose, DiagonalTriple};
pub use generator::SystemGenerator;
pub use symmetrize::{symmetrize, symmetrize_lumped, SYMMETRIC_BANDWIDTH};
