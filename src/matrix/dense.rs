//! Dense view of a banded matrix on top of Faer.
//!
//! The view is built on demand and never written back, so the banded store
//! stays the single source of truth. It serves debug printing and dense
//! reference checks in tests.

use std::fmt;

use crate::error::BandError;
use crate::matrix::banded::{band_range, BandedMatrix};
use faer::Mat;
use num_traits::Float;

impl<T: Float> BandedMatrix<T> {
    /// Materialize the full n×n matrix; out-of-band entries are zero.
    pub fn to_dense(&self) -> Mat<T> {
        let mut m = Mat::from_fn(self.n(), self.n(), |_, _| T::zero());
        for offset in self.offsets() {
            let diag = self.diagonal(offset);
            for i in band_range(offset, self.n()) {
                m[(i, (i as isize + offset) as usize)] = diag[i];
            }
        }
        m
    }

    /// Keep the `k` central diagonals of a square dense matrix.
    pub fn from_dense(dense: &Mat<T>, k: usize) -> Result<Self, BandError> {
        if dense.nrows() != dense.ncols() {
            return Err(BandError::DimensionMismatch { expected: dense.nrows(), found: dense.ncols() });
        }
        Self::from_fn(dense.nrows(), k, |i, j| dense[(i, j)])
    }
}

/// Prints the dense form, one row per line.
impl<T: Float + fmt::Display> fmt::Display for BandedMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n() {
            for j in 0..self.n() {
                write!(f, "{:5.1} ", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
