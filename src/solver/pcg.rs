//! Preconditioned Conjugate Gradient (PCG) per Saad §9.2
//!
//! One call runs the state machine
//!
//! ```text
//! INIT ──▶ ITERATING ──▶ CONVERGED | MAX_ITERS_REACHED | BREAKDOWN
//! ```
//!
//! INIT forms r = b − A·x, z = M⁻¹r, p = z and rz = ⟨r, z⟩. Each iteration
//! computes Ap, stops with `Breakdown` when |⟨p, Ap⟩| is below
//! [`BREAKDOWN_THRESHOLD`] (or not finite), otherwise steps x and r, stops
//! with `Converged` once ‖r‖₂ < tol, and else refreshes z and p. Reaching
//! `max_iters` ends with `MaxIterationsReached`. None of the three outcomes
//! is an error: `x` always holds the last accepted iterate.

use std::time::{Duration, Instant};

use log::{trace, warn};
use num_traits::{Float, NumCast};

use crate::core::traits::{Indexing, InnerProduct, MatVec};
use crate::error::BandError;
use crate::matrix::try_zeroed;
use crate::preconditioner::Preconditioner;
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, PcgOutcome, SolveStats};
use crate::utils::instrument::{Markers, NoMarkers, Regions};

/// |pᵀAp| below this ends the solve with a breakdown.
pub const BREAKDOWN_THRESHOLD: f64 = 1e-15;

pub struct PcgSolver<T> {
    pub conv: Convergence<T>,
    pub breakdown_tol: T,
    pub monitor: Option<Box<dyn FnMut(usize, T)>>,
    /// ‖r‖₂ after INIT, then after every x/r update.
    pub residual_history: Vec<T>,
    markers: Box<dyn Markers>,
    loop_time: Duration,
}

impl<T: Float> PcgSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self {
            conv: Convergence { tol, max_iters },
            breakdown_tol: <T as NumCast>::from(BREAKDOWN_THRESHOLD).unwrap_or_else(T::min_positive_value),
            monitor: None,
            residual_history: Vec::new(),
            markers: Box::new(NoMarkers),
            loop_time: Duration::ZERO,
        }
    }
    pub fn with_breakdown_tol(mut self, tol: T) -> Self {
        self.breakdown_tol = tol;
        self
    }
    pub fn with_monitor<F>(mut self, f: F) -> Self
    where F: FnMut(usize, T) + 'static {
        self.monitor = Some(Box::new(f));
        self
    }
    pub fn with_markers<M: Markers + 'static>(mut self, markers: M) -> Self {
        self.markers = Box::new(markers);
        self
    }
    pub fn clear_history(&mut self) {
        self.residual_history.clear();
    }
    /// Wall-clock time of the last iteration loop (INIT excluded).
    pub fn loop_time(&self) -> Duration {
        self.loop_time
    }

    fn record(&mut self, i: usize, res_norm: T) {
        if let Some(ref mut monitor) = self.monitor {
            monitor(i, res_norm);
        }
        self.residual_history.push(res_norm);
    }
}

/// z = M⁻¹ r, or z = r without a preconditioner.
fn precondition<T: Float>(
    pc: Option<&dyn Preconditioner<T>>,
    r: &[T],
    z: &mut [T],
) -> Result<(), BandError> {
    match pc {
        Some(pc) => pc.apply(r, z),
        None => {
            z.copy_from_slice(r);
            Ok(())
        }
    }
}

impl<M, T> LinearSolver<M, T> for PcgSolver<T>
where
    M: MatVec<T> + Indexing,
    T: Float + std::fmt::LowerExp,
{
    type Error = BandError;

    fn solve(
        &mut self,
        a: &M,
        pc: Option<&dyn Preconditioner<T>>,
        b: &[T],
        x: &mut [T],
    ) -> Result<SolveStats<T>, BandError> {
        let n = a.nrows();
        if b.len() != n {
            return Err(BandError::DimensionMismatch { expected: n, found: b.len() });
        }
        if x.len() != n {
            return Err(BandError::DimensionMismatch { expected: n, found: x.len() });
        }
        let ip = ();
        self.residual_history.clear();
        self.loop_time = Duration::ZERO;

        // INIT
        let mut r = try_zeroed(n)?;
        let mut z = try_zeroed(n)?;
        let mut p = try_zeroed(n)?;
        let mut ap = try_zeroed(n)?;
        a.residual(b, x, &mut r);
        precondition(pc, &r, &mut z)?;
        p.copy_from_slice(&z);
        let mut rz = ip.dot(&r, &z);
        let mut res_norm = ip.norm(&r);
        self.record(0, res_norm);

        let mut stats = SolveStats {
            iterations: 0,
            final_residual: res_norm,
            outcome: PcgOutcome::MaxIterationsReached,
        };
        let start = Instant::now();
        self.markers.start(Regions::PCG_LOOP);
        while stats.iterations < self.conv.max_iters {
            stats.iterations += 1;
            let i = stats.iterations;

            self.markers.start(Regions::MATVEC);
            a.matvec(&p, &mut ap);
            self.markers.stop(Regions::MATVEC);

            let p_dot_ap = ip.dot(&p, &ap);
            if !p_dot_ap.is_finite() || p_dot_ap.abs() < self.breakdown_tol {
                warn!("pcg breakdown at iteration {i}: p^T A p = {p_dot_ap:e}");
                stats.outcome = PcgOutcome::Breakdown;
                break;
            }
            let alpha = rz / p_dot_ap;
            for (xj, &pj) in x.iter_mut().zip(&p) {
                *xj = *xj + alpha * pj;
            }
            for (rj, &apj) in r.iter_mut().zip(&ap) {
                *rj = *rj - alpha * apj;
            }
            res_norm = ip.norm(&r);
            stats.final_residual = res_norm;
            trace!("pcg iteration {i}: ||r|| = {res_norm:e}");
            self.record(i, res_norm);
            if self.conv.is_converged(res_norm) {
                stats.outcome = PcgOutcome::Converged;
                break;
            }

            precondition(pc, &r, &mut z)?;
            let rz_new = ip.dot(&r, &z);
            let beta = rz_new / rz;
            for (pj, &zj) in p.iter_mut().zip(&z) {
                *pj = zj + beta * *pj;
            }
            rz = rz_new;
        }
        self.markers.stop(Regions::PCG_LOOP);
        self.loop_time = start.elapsed();

        if stats.outcome == PcgOutcome::MaxIterationsReached {
            warn!("pcg stopped at the iteration cap ({}) with ||r|| = {res_norm:e}", self.conv.max_iters);
        }
        Ok(stats)
    }
}
