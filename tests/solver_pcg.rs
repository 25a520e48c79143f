//! Tests for the PCG engine on banded systems with known solutions.
//!
//! Covers convergence with and without Jacobi preconditioning, residual
//! monotonicity on a well-conditioned system and breakdown detection.

use approx::assert_abs_diff_eq;
use bandpcg::core::traits::MatVec;
use bandpcg::matrix::BandedMatrix;
use bandpcg::preconditioner::{build_preconditioner, Preconditioner};
use bandpcg::solver::{residual_norm, LinearSolver, PcgSolver};
use bandpcg::system::decompose;
use bandpcg::utils::PcgOutcome;

const EPS: f64 = 1e-10;

/// Tridiagonal (−1, 4, −1), n = 11, with b = A·x for x = (1, 2, …, 11).
fn known_system() -> (BandedMatrix<f64>, Vec<f64>, Vec<f64>) {
    let n = 11;
    let a = BandedMatrix::from_fn(n, 3, |i, j| if i == j { 4.0 } else { -1.0 }).unwrap();
    let x_true: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    let mut b = vec![0.0; n];
    a.matvec(&x_true, &mut b);
    (a, b, x_true)
}

fn solve_with_omega(
    a: &BandedMatrix<f64>,
    b: &[f64],
    omega: f64,
    maxit: usize,
) -> (Vec<f64>, bandpcg::SolveStats<f64>, Vec<f64>) {
    let dlu = decompose(a, EPS).unwrap();
    let pc = build_preconditioner(&dlu, omega, EPS).unwrap();
    let pc_ref = pc.as_ref().map(|p| p as &dyn Preconditioner<f64>);
    let mut x = vec![0.0; a.n()];
    let mut solver = PcgSolver::new(EPS, maxit);
    let stats = solver.solve(a, pc_ref, b, &mut x).unwrap();
    (x, stats, solver.residual_history.clone())
}

#[test]
fn jacobi_converges_to_known_solution() {
    let (a, b, x_true) = known_system();
    let (x, stats, _) = solve_with_omega(&a, &b, 0.0, 100);
    assert_eq!(stats.outcome, PcgOutcome::Converged);
    assert!(stats.iterations <= a.n(), "took {} iterations", stats.iterations);
    assert!(stats.final_residual < EPS);
    for (xi, ti) in x.iter().zip(&x_true) {
        assert_abs_diff_eq!(*xi, *ti, epsilon = 1e-8);
    }
}

#[test]
fn identity_converges_to_same_solution() {
    let (a, b, x_true) = known_system();
    let (x_id, stats, _) = solve_with_omega(&a, &b, -1.0, 100);
    let (x_jac, _, _) = solve_with_omega(&a, &b, 0.0, 100);
    assert!(stats.converged());
    assert!(stats.iterations <= a.n());
    for i in 0..a.n() {
        assert_abs_diff_eq!(x_id[i], x_true[i], epsilon = 1e-8);
        assert_abs_diff_eq!(x_id[i], x_jac[i], epsilon = 1e-8);
    }
    assert!(residual_norm(&a, &b, &x_id).unwrap() < 1e-8);
}

/// κ(A) < 1.5 here, which bounds every step's residual ratio below 1.
#[test]
fn residual_history_is_non_increasing() {
    let n = 11;
    let a = BandedMatrix::from_fn(n, 3, |i, j| if i == j { 10.0 } else { 1.0 }).unwrap();
    let b: Vec<f64> = (0..n).map(|i| 1.0 + (i % 3) as f64).collect();
    let (_, stats, history) = solve_with_omega(&a, &b, -1.0, 100);
    assert!(stats.converged());
    assert_eq!(history.len(), stats.iterations + 1);
    for w in history.windows(2) {
        assert!(w[1] <= w[0] * (1.0 + 1e-12) + 1e-14, "{} -> {}", w[0], w[1]);
    }
}

/// diag(1, −1, 1, …) with b = 1: the first direction is A-orthogonal to itself.
#[test]
fn self_orthogonal_direction_breaks_down() {
    let n = 12;
    let a = BandedMatrix::from_fn(n, 3, |i, j| {
        if i != j { 0.0 } else if i % 2 == 0 { 1.0 } else { -1.0 }
    })
    .unwrap();
    let b = vec![1.0; n];
    for omega in [-1.0, 0.0] {
        let (x, stats, history) = solve_with_omega(&a, &b, omega, 50);
        assert_eq!(stats.outcome, PcgOutcome::Breakdown, "omega = {omega}");
        assert_eq!(stats.iterations, 1);
        assert!(x.iter().all(|&v| v == 0.0), "partial solution must be preserved");
        assert!(stats.final_residual.is_finite());
        assert_abs_diff_eq!(stats.final_residual, (n as f64).sqrt(), epsilon = 1e-12);
        assert_eq!(history.len(), 1);
    }
}

#[test]
fn cap_reached_returns_partial_solution() {
    let (a, b, _) = known_system();
    let (x, stats, _) = solve_with_omega(&a, &b, 0.0, 2);
    assert_eq!(stats.outcome, PcgOutcome::MaxIterationsReached);
    assert_eq!(stats.iterations, 2);
    assert!(x.iter().all(|v| v.is_finite()));
    assert!(stats.final_residual > EPS);
}

#[test]
fn nonzero_initial_guess_is_used() {
    let (a, b, x_true) = known_system();
    let mut x = x_true.clone();
    let mut solver = PcgSolver::new(EPS, 10);
    let stats = solver.solve(&a, None, &b, &mut x).unwrap();
    // starting at the solution: r = 0, so the first step has p = 0
    assert_eq!(stats.outcome, PcgOutcome::Breakdown);
    assert_eq!(x, x_true);
}
