//! Extraction of the principal, sub- and super-diagonal.

use log::debug;
use num_traits::Float;

use crate::error::BandError;
use crate::matrix::{try_zeroed, BandedMatrix};

/// The three central diagonals of a banded matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalTriple<T> {
    /// Principal diagonal, length n, every |D[i]| ≥ ε.
    pub d: Vec<T>,
    /// Sub-diagonal, length n − 1: `l[i] = A[i+1][i]`.
    pub l: Vec<T>,
    /// Super-diagonal, length n − 1: `u[i] = A[i][i+1]`.
    pub u: Vec<T>,
}

/// Split `a` into (D, L, U), raising any |D[i]| < `eps` to exactly `eps`.
///
/// The floor is a silent repair, not an error; the number of repaired
/// entries is logged at debug level.
pub fn decompose<T: Float>(a: &BandedMatrix<T>, eps: T) -> Result<DiagonalTriple<T>, BandError> {
    let n = a.n();
    let mut d = try_zeroed(n)?;
    let mut l = try_zeroed(n - 1)?;
    let mut u = try_zeroed(n - 1)?;

    let mut floored = 0usize;
    for (di, &aii) in d.iter_mut().zip(a.diagonal(0)) {
        *di = if aii.abs() < eps {
            floored += 1;
            eps
        } else {
            aii
        };
    }
    l.copy_from_slice(&a.diagonal(-1)[1..]);
    u.copy_from_slice(&a.diagonal(1)[..n - 1]);

    if floored > 0 {
        debug!("decompose: raised {floored} diagonal entries to the floor");
    }
    Ok(DiagonalTriple { d, l, u })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tridiag() -> BandedMatrix<f64> {
        BandedMatrix::from_fn(11, 5, |i, j| {
            if i == j {
                10.0 + i as f64
            } else if j == i + 1 {
                -(i as f64)
            } else if i == j + 1 {
                100.0 + j as f64
            } else {
                0.5
            }
        })
        .unwrap()
    }

    #[test]
    fn extracts_central_diagonals() {
        let t = decompose(&tridiag(), 1e-12).unwrap();
        assert_eq!(t.d.len(), 11);
        assert_eq!(t.l.len(), 10);
        assert_eq!(t.u.len(), 10);
        assert_eq!(t.d[3], 13.0);
        assert_eq!(t.u[3], -3.0);
        assert_eq!(t.l[3], 103.0);
    }

    #[test]
    fn zero_pivot_is_floored_exactly() {
        let mut a = tridiag();
        a.set(4, 4, 0.0);
        a.set(5, 5, -1e-20);
        let t = decompose(&a, 1e-8).unwrap();
        assert_eq!(t.d[4], 1e-8);
        assert_eq!(t.d[5], 1e-8);
        assert_eq!(t.d[6], 16.0);
    }

    #[test]
    fn is_idempotent() {
        let a = tridiag();
        assert_eq!(decompose(&a, 1e-8).unwrap(), decompose(&a, 1e-8).unwrap());
    }
}
