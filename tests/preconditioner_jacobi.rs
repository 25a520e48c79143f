//! Jacobi preconditioner and D/L/U extraction tests.
//!
//! Verifies the ω selector, the ε floor on zero pivots, idempotence of the
//! decomposition and that Jacobi scaling pays off on a badly scaled system.

use bandpcg::error::BandError;
use bandpcg::matrix::BandedMatrix;
use bandpcg::preconditioner::{build_preconditioner, Jacobi, PcKind, Preconditioner};
use bandpcg::solver::{LinearSolver, PcgSolver};
use bandpcg::system::{decompose, symmetrize, SystemGenerator};

fn with_zero_pivot() -> BandedMatrix<f64> {
    let mut a = BandedMatrix::from_fn(11, 3, |i, j| if i == j { 4.0 } else { -1.0 }).unwrap();
    a.set(5, 5, 0.0);
    a
}

#[test]
fn zero_pivot_becomes_epsilon() {
    let eps = 1e-6;
    let dlu = decompose(&with_zero_pivot(), eps).unwrap();
    assert_eq!(dlu.d[5], eps);
    let pc = build_preconditioner(&dlu, 0.0, eps).unwrap().unwrap();
    assert_eq!(pc.diagonal()[5], eps);
    let r = vec![1.0; 11];
    let mut z = vec![0.0; 11];
    pc.apply(&r, &mut z).unwrap();
    assert!(z.iter().all(|v| v.is_finite()));
    assert_eq!(z[5], 1.0 / eps);
}

#[test]
fn jacobi_from_matrix_floors_too() {
    let pc = Jacobi::from_matrix(&with_zero_pivot(), 1e-9).unwrap();
    assert_eq!(pc.diagonal()[5], 1e-9);
    assert_eq!(pc.diagonal()[0], 4.0);
}

#[test]
fn decomposition_is_idempotent_on_generated_system() {
    let (a, b) = SystemGenerator::new(9).generate(50, 7).unwrap();
    let (asp, _) = symmetrize(&a, &b).unwrap();
    let first = decompose(&asp, 1e-8).unwrap();
    let second = decompose(&asp, 1e-8).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.l, first.u, "symmetric input has L = U");
}

#[test]
fn unsupported_omega_is_rejected() {
    let dlu = decompose(&with_zero_pivot(), 1e-8).unwrap();
    for omega in [1.0, 0.5, -0.5, 1.9] {
        assert_eq!(
            build_preconditioner(&dlu, omega, 1e-8).unwrap_err(),
            BandError::UnsupportedPreconditioner(omega)
        );
    }
    assert_eq!(PcKind::from_omega(-1.0).unwrap(), PcKind::None);
}

/// Diagonal spread over three orders of magnitude: Jacobi rescales it away.
/// The tolerance keeps pᵀAp far above the breakdown guard for both runs.
#[test]
fn jacobi_beats_identity_on_badly_scaled_system() {
    let n = 60;
    let a = BandedMatrix::from_fn(n, 3, |i, j| if i == j { 1.0 + (i * i) as f64 } else { 0.1 }).unwrap();
    let b = vec![1.0; n];
    let dlu = decompose(&a, 1e-12).unwrap();
    let mut iterations = Vec::new();
    for omega in [0.0, -1.0] {
        let pc = build_preconditioner(&dlu, omega, 1e-12).unwrap();
        let pc_ref = pc.as_ref().map(|p| p as &dyn Preconditioner<f64>);
        let mut x = vec![0.0; n];
        let mut solver = PcgSolver::new(1e-4, 1000);
        let stats = solver.solve(&a, pc_ref, &b, &mut x).unwrap();
        assert!(stats.converged(), "omega = {omega}: {:?}", stats.outcome);
        iterations.push(stats.iterations);
    }
    assert!(iterations[0] < iterations[1], "jacobi {} vs identity {}", iterations[0], iterations[1]);
}
