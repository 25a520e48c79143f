//! Preconditioners for the PCG solver.
//!
//! This module defines the Preconditioner trait, the selector decoded from
//! the ω input, and the builder that turns a [`DiagonalTriple`] into a
//! preconditioner. Only Jacobi is implemented; "no preconditioner" is
//! represented by `None` and makes the apply step the identity.

use log::debug;
use num_traits::Float;

use crate::error::BandError;
use crate::system::DiagonalTriple;

/// A preconditioner M ≈ A.
pub trait Preconditioner<T> {
    /// Apply M⁻¹ to r, writing z = M⁻¹ r.
    fn apply(&self, r: &[T], z: &mut [T]) -> Result<(), BandError>;
}

pub mod jacobi;
pub use jacobi::Jacobi;

/// Preconditioner selected by ω.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcKind {
    /// ω = −1: M = I.
    None,
    /// ω = 0: M = D.
    Jacobi,
}

impl PcKind {
    /// Decode ω. Values other than −1 and 0 are reserved for relaxation
    /// variants that do not exist yet and are rejected.
    pub fn from_omega(omega: f64) -> Result<Self, BandError> {
        if omega == -1.0 {
            Ok(PcKind::None)
        } else if omega == 0.0 {
            Ok(PcKind::Jacobi)
        } else {
            Err(BandError::UnsupportedPreconditioner(omega))
        }
    }
}

/// Build the preconditioner for `omega` from the D/L/U split.
///
/// Returns `Ok(None)` for ω = −1. `L` and `U` are not consumed by Jacobi.
pub fn build_preconditioner<T: Float>(
    dlu: &DiagonalTriple<T>,
    omega: f64,
    eps: T,
) -> Result<Option<Jacobi<T>>, BandError> {
    match PcKind::from_omega(omega)? {
        PcKind::None => {
            debug!("preconditioner: identity");
            Ok(None)
        }
        PcKind::Jacobi => {
            debug!("preconditioner: jacobi, n={}", dlu.d.len());
            Ok(Some(Jacobi::from_diagonal(&dlu.d, eps)?))
        }
    }
}
