//! bandpcg: Preconditioned Conjugate Gradient for banded SPD systems
//!
//! This crate stores banded matrices in diagonal-major (DIA) layout and
//! solves them with a Jacobi- or identity-preconditioned CG. It also ships
//! the benchmark pipeline around the solver: a seeded generator of banded
//! test systems, a symmetrizer projecting them onto 7-diagonal symmetric
//! systems, the D/L/U split feeding the preconditioner, and an independent residual
//! check on the original system.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod preconditioner;
pub mod solver;
pub mod system;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use matrix::*;
pub use preconditioner::*;
pub use solver::*;
pub use system::*;
pub use utils::*;
