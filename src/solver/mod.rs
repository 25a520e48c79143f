//! Solver interfaces: the PCG engine and the independent residual check.

use crate::preconditioner::Preconditioner;
use crate::utils::convergence::SolveStats;

/// Common interface for iterative solvers.
pub trait LinearSolver<M, T> {
    type Error;
    /// Solve A·x = b starting from the guess in `x`, writing the result into `x`.
    /// Returns iteration stats (including how the loop ended).
    fn solve(
        &mut self,
        a: &M,
        pc: Option<&dyn Preconditioner<T>>,
        b: &[T],
        x: &mut [T],
    ) -> Result<SolveStats<T>, Self::Error>;
}

pub mod pcg;
pub use pcg::{PcgSolver, BREAKDOWN_THRESHOLD};

pub mod residual;
pub use residual::{residual_norm, residual_norm_with};
