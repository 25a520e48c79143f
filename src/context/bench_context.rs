//! Pipeline driver for one banded PCG run.

use std::rc::Rc;

use log::{debug, info};

use crate::config::SolverConfig;
use crate::error::BandError;
use crate::matrix::{try_zeroed, BandedMatrix};
use crate::preconditioner::{build_preconditioner, Preconditioner};
use crate::solver::{residual_norm_with, LinearSolver, PcgSolver};
use crate::system::{decompose, symmetrize, SystemGenerator};
use crate::utils::convergence::SolveStats;
use crate::utils::instrument::{Markers, NoMarkers};
use crate::utils::timing::{timed, StageTimes};

/// Everything a run produces.
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub n: usize,
    /// Solution of the symmetrized system.
    pub x: Vec<f64>,
    /// Iterations, convergence norm (‖r‖₂ of the symmetrized system) and outcome.
    pub stats: SolveStats<f64>,
    /// ‖b − A·x‖₂ on the original generated system.
    pub residual_norm: f64,
    pub times: StageTimes,
}

/// Factory and context holder for a benchmark run.
pub struct BenchContext {
    config: SolverConfig,
    markers: Rc<dyn Markers>,
}

impl BenchContext {
    pub fn new(config: SolverConfig) -> Self {
        Self { config, markers: Rc::new(NoMarkers) }
    }

    /// Install an instrumentation hook for the PCG loop, its mat-vecs and
    /// the residual evaluation.
    pub fn with_markers(mut self, markers: Rc<dyn Markers>) -> Self {
        self.markers = markers;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generate the system from the configured seed and solve it.
    pub fn run(&self) -> Result<SolveResult, BandError> {
        let cfg = &self.config;
        let mut generator = SystemGenerator::new(cfg.seed());
        let (system, t_gen) = timed(|| generator.generate(cfg.n(), cfg.k()));
        let (a, b) = system?;
        let mut result = self.solve_system(&a, &b)?;
        result.times.generate = t_gen;
        Ok(result)
    }

    /// Run everything after generation on a caller-supplied system.
    ///
    /// `a` is symmetrized for PCG; the residual is measured against `a`
    /// itself.
    pub fn solve_system(&self, a: &BandedMatrix<f64>, b: &[f64]) -> Result<SolveResult, BandError> {
        let cfg = &self.config;
        let n = a.n();
        let eps = cfg.epsilon();
        let mut times = StageTimes::default();

        let (sym, t_sym) = timed(|| symmetrize(a, b));
        let (asp, bsp) = sym?;
        times.symmetrize = t_sym;
        debug!("symmetrized system: n={n} k={}", asp.k());

        let (dlu, t_dlu) = timed(|| decompose(&asp, eps));
        let dlu = dlu?;
        times.decompose = t_dlu;

        let (pc, t_pc) = timed(|| build_preconditioner(&dlu, cfg.omega(), eps));
        let pc = pc?;
        times.preconditioner = pc.as_ref().map(|_| t_pc);

        let mut x = try_zeroed(n)?;
        let mut solver = PcgSolver::new(eps, cfg.maxit()).with_markers(Rc::clone(&self.markers));
        let pc_ref = pc.as_ref().map(|p| p as &dyn Preconditioner<f64>);
        let stats = solver.solve(&asp, pc_ref, &bsp, &mut x)?;
        times.iteration_avg = StageTimes::average(solver.loop_time(), stats.iterations);

        let (res, t_res) = timed(|| residual_norm_with(a, b, &x, &*self.markers));
        let residual_norm = res?;
        times.residual = t_res;

        info!(
            "pcg finished: {:?} after {} iterations, ||r|| = {:e}, ||b - Ax|| = {:e}",
            stats.outcome, stats.iterations, stats.final_residual, residual_norm
        );
        Ok(SolveResult { n, x, stats, residual_norm, times })
    }
}
