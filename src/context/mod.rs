//! Context module: end-to-end orchestration of a banded PCG run.
//!
//! [`BenchContext`] takes a validated [`SolverConfig`](crate::config::SolverConfig)
//! and drives the whole pipeline:
//!
//! ```text
//! generate ─▶ symmetrize ─▶ decompose ─▶ build preconditioner ─▶ PCG ─▶ residual
//! ```
//!
//! Each stage is timed; the timings are reported next to the solution and
//! never influence it.
//!
//! # Example
//! ```rust
//! use bandpcg::{BenchContext, SolverConfig};
//! let cfg = SolverConfig::new(50, 7, 0.0, 500, 1e-8).unwrap();
//! let result = BenchContext::new(cfg).run().unwrap();
//! assert_eq!(result.x.len(), 50);
//! ```
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems. SIAM.

pub mod bench_context;
pub use bench_context::{BenchContext, SolveResult};
