//! Diagonal-major (DIA) storage for square banded matrices.
//!
//! A matrix with `k = 2d + 1` diagonals is kept as `k` contiguous runs of
//! length `n`, one per diagonal offset `o ∈ [-d, d]`. The element at row `i`
//! and offset `o` (column `i + o`) lives at `store[(o + d) * n + i]`.
//! Slots whose column would fall outside `0..n` exist but are never read.
//!
//! Every kernel walks the matrix diagonal by diagonal over the row range
//! returned by [`band_range`], so inner loops are contiguous and carry no
//! bounds branches.

use std::ops::Range;

use crate::core::traits::{Indexing, MatVec};
use crate::error::BandError;
use crate::matrix::try_zeroed;
use num_traits::Float;

/// Storage index of (row, diagonal offset) in an `n`-row matrix with
/// half-bandwidth `d`.
///
/// `offset` must lie in `[-d, d]`; callers guarantee it by construction.
#[inline]
pub fn address(n: usize, d: usize, row: usize, offset: isize) -> usize {
    debug_assert!(offset.unsigned_abs() <= d, "offset {offset} outside band ±{d}");
    debug_assert!(row < n);
    (offset + d as isize) as usize * n + row
}

/// Rows `[start, end)` for which diagonal `offset` has an in-matrix column.
#[inline]
pub fn band_range(offset: isize, n: usize) -> Range<usize> {
    let start = if offset < 0 { offset.unsigned_abs().min(n) } else { 0 };
    let end = if offset > 0 { n.saturating_sub(offset as usize) } else { n };
    start..end.max(start)
}

/// Square banded matrix in diagonal-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix<T> {
    n: usize,
    k: usize,
    store: Vec<T>,
}

impl<T: Float> BandedMatrix<T> {
    /// Zero matrix of dimension `n` with `k` stored diagonals.
    ///
    /// `k` must be odd and at least 3. A band wider than the matrix is
    /// allowed; diagonals with no in-matrix column stay empty.
    pub fn zeros(n: usize, k: usize) -> Result<Self, BandError> {
        Self::check_shape(n, k)?;
        let len = n.checked_mul(k).ok_or(BandError::Allocation(usize::MAX))?;
        Ok(Self { n, k, store: try_zeroed(len)? })
    }

    /// Wrap an existing diagonal-major store of length `n * k`.
    pub fn from_store(n: usize, k: usize, store: Vec<T>) -> Result<Self, BandError> {
        Self::check_shape(n, k)?;
        if store.len() != n * k {
            return Err(BandError::DimensionMismatch { expected: n * k, found: store.len() });
        }
        Ok(Self { n, k, store })
    }

    /// Build a matrix by evaluating `f(row, col)` on every in-band position.
    pub fn from_fn<F>(n: usize, k: usize, mut f: F) -> Result<Self, BandError>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut m = Self::zeros(n, k)?;
        for offset in m.offsets() {
            let rows = band_range(offset, n);
            let diag = m.diagonal_mut(offset);
            for i in rows {
                diag[i] = f(i, (i as isize + offset) as usize);
            }
        }
        Ok(m)
    }

    fn check_shape(n: usize, k: usize) -> Result<(), BandError> {
        if k < 3 || k % 2 == 0 {
            return Err(BandError::InvalidBandwidth(k));
        }
        Ok(())
    }

    /// Dimension n.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored diagonals k.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Half-bandwidth d = (k − 1) / 2.
    pub fn half_bandwidth(&self) -> usize {
        (self.k - 1) / 2
    }

    /// Diagonal offsets `-d..=d`, lowest first (storage order).
    pub fn offsets(&self) -> std::ops::RangeInclusive<isize> {
        let d = self.half_bandwidth() as isize;
        -d..=d
    }

    /// Raw diagonal-major store.
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    /// Storage index of (row, offset) in this matrix.
    #[inline]
    pub fn address(&self, row: usize, offset: isize) -> usize {
        address(self.n, self.half_bandwidth(), row, offset)
    }

    /// The full length-n run holding diagonal `offset`.
    ///
    /// Only the rows in `band_range(offset, n)` carry matrix entries.
    #[inline]
    pub fn diagonal(&self, offset: isize) -> &[T] {
        let start = self.address(0, offset);
        &self.store[start..start + self.n]
    }

    #[inline]
    pub fn diagonal_mut(&mut self, offset: isize) -> &mut [T] {
        let start = self.address(0, offset);
        let n = self.n;
        &mut self.store[start..start + n]
    }

    /// Logical element (row, col); zero outside the band.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.n && col < self.n, "({row}, {col}) out of bounds for n={}", self.n);
        let offset = col as isize - row as isize;
        if offset.unsigned_abs() > self.half_bandwidth() {
            return T::zero();
        }
        self.store[self.address(row, offset)]
    }

    /// Set element (row, col).
    ///
    /// # Panics
    /// If the position lies outside the band.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.n && col < self.n, "({row}, {col}) out of bounds for n={}", self.n);
        let offset = col as isize - row as isize;
        assert!(
            offset.unsigned_abs() <= self.half_bandwidth(),
            "({row}, {col}) lies outside the band of half-width {}",
            self.half_bandwidth()
        );
        let idx = self.address(row, offset);
        self.store[idx] = value;
    }

    /// True when `get(i, j) == get(j, i)` for every in-band pair, within `tol`.
    pub fn is_symmetric(&self, tol: T) -> bool {
        self.offsets().filter(|&o| o > 0).all(|o| {
            let upper = self.diagonal(o);
            let lower = self.diagonal(-o);
            band_range(o, self.n).all(|i| (upper[i] - lower[i + o as usize]).abs() <= tol)
        })
    }
}

impl<T: Float> MatVec<T> for BandedMatrix<T> {
    /// y = A·x, accumulated one diagonal at a time.
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.n, "Input vector x has incorrect length");
        assert_eq!(y.len(), self.n, "Output vector y has incorrect length");
        y.iter_mut().for_each(|yi| *yi = T::zero());
        for offset in self.offsets() {
            let rows = band_range(offset, self.n);
            if rows.is_empty() {
                continue;
            }
            let col0 = (rows.start as isize + offset) as usize;
            let len = rows.len();
            let diag = &self.diagonal(offset)[rows.clone()];
            let xs = &x[col0..col0 + len];
            for ((yi, &a), &xj) in y[rows].iter_mut().zip(diag).zip(xs) {
                *yi = *yi + a * xj;
            }
        }
    }

    /// r = b − A·x, subtracting each diagonal's contribution in place.
    fn residual(&self, b: &[T], x: &[T], r: &mut [T]) {
        assert_eq!(b.len(), self.n, "Right-hand side b has incorrect length");
        assert_eq!(x.len(), self.n, "Input vector x has incorrect length");
        assert_eq!(r.len(), self.n, "Residual vector r has incorrect length");
        r.copy_from_slice(b);
        for offset in self.offsets() {
            let rows = band_range(offset, self.n);
            if rows.is_empty() {
                continue;
            }
            let col0 = (rows.start as isize + offset) as usize;
            let len = rows.len();
            let diag = &self.diagonal(offset)[rows.clone()];
            let xs = &x[col0..col0 + len];
            for ((ri, &a), &xj) in r[rows].iter_mut().zip(diag).zip(xs) {
                *ri = *ri - a * xj;
            }
        }
    }
}

impl<T> Indexing for BandedMatrix<T> {
    fn nrows(&self) -> usize {
        self.n
    }
}
