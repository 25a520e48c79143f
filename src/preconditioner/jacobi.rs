// Jacobi preconditioner implementation

use crate::error::BandError;
use crate::matrix::{try_zeroed, BandedMatrix};
use crate::preconditioner::Preconditioner;
use num_traits::Float;

/// Jacobi preconditioner: z[i] = r[i] / D[i].
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobi<T> {
    pub(crate) diag: Vec<T>,
}

impl<T: Float> Jacobi<T> {
    /// Use `d` as the per-row divisor, re-applying the `eps` floor.
    pub fn from_diagonal(d: &[T], eps: T) -> Result<Self, BandError> {
        let mut diag = try_zeroed(d.len())?;
        for (m, &di) in diag.iter_mut().zip(d) {
            *m = if di.abs() < eps { eps } else { di };
        }
        Ok(Self { diag })
    }

    /// Take the principal diagonal of `a` directly.
    pub fn from_matrix(a: &BandedMatrix<T>, eps: T) -> Result<Self, BandError> {
        Self::from_diagonal(a.diagonal(0), eps)
    }

    /// The divisors M[i].
    pub fn diagonal(&self) -> &[T] {
        &self.diag
    }
}

impl<T: Float> Preconditioner<T> for Jacobi<T> {
    fn apply(&self, r: &[T], z: &mut [T]) -> Result<(), BandError> {
        if r.len() != self.diag.len() || z.len() != self.diag.len() {
            return Err(BandError::DimensionMismatch {
                expected: self.diag.len(),
                found: if r.len() != self.diag.len() { r.len() } else { z.len() },
            });
        }
        for ((zi, &ri), &mi) in z.iter_mut().zip(r).zip(&self.diag) {
            *zi = ri / mi;
        }
        Ok(())
    }
}
