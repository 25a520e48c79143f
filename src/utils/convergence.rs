//! Convergence tracking & tolerance checks for iterative solvers.

/// How a solve ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcgOutcome {
    /// ‖r‖₂ fell below the tolerance.
    Converged,
    /// The iteration cap was reached first.
    MaxIterationsReached,
    /// |pᵀAp| fell below the breakdown threshold; the step size is undefined.
    Breakdown,
}

/// Stopping criteria.
pub struct Convergence<T> {
    /// Absolute tolerance on ‖r‖₂.
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    /// Number of iterations entered, including the one that stopped the loop.
    pub iterations: usize,
    /// ‖r‖₂ at the stopping point.
    pub final_residual: T,
    pub outcome: PcgOutcome,
}

impl<T> SolveStats<T> {
    pub fn converged(&self) -> bool {
        self.outcome == PcgOutcome::Converged
    }
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// True once `res_norm` is strictly below the absolute tolerance.
    ///
    /// There is no relative variant: callers wanting one scale `tol` by ‖b‖.
    pub fn is_converged(&self, res_norm: T) -> bool {
        res_norm < self.tol
    }
}
