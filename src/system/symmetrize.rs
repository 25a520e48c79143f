//! Projection of a banded system onto a symmetric 7-diagonal one.
//!
//! Computes `AᵀA` and `Aᵀb` directly on the diagonal-major store in
//! O(n·d²), keeping only the [`SYMMETRIC_BANDWIDTH`] central diagonals of
//! the product. For `k > 3` the exact product is wider and [`symmetrize`]
//! drops the entries outside the kept band. [`symmetrize_lumped`] instead
//! adds every dropped `|c_ij|` to both diagonal entries `i` and `j`, which
//! keeps the truncated matrix at least as positive definite as `AᵀA`.

use log::debug;
use num_traits::Float;

use crate::error::BandError;
use crate::matrix::{band_range, try_zeroed, BandedMatrix};

/// Number of diagonals of the symmetrized matrix.
pub const SYMMETRIC_BANDWIDTH: usize = 7;

/// `(AᵀA)_ij = Σ_m A_mi · A_mj` over the rows `m` where both are in band.
fn gram_entry<T: Float>(a: &BandedMatrix<T>, i: usize, j: usize) -> T {
    let d = a.half_bandwidth();
    let lo = i.max(j).saturating_sub(d);
    let hi = (i.min(j) + d).min(a.n() - 1);
    (lo..=hi).fold(T::zero(), |acc, m| {
        let ami = a.diagonal(i as isize - m as isize)[m];
        let amj = a.diagonal(j as isize - m as isize)[m];
        acc + ami * amj
    })
}

/// Build `(ASP, bsp)` from `(A, b)`; `ASP` has [`SYMMETRIC_BANDWIDTH`]
/// diagonals and out-of-band entries of `AᵀA` are dropped.
pub fn symmetrize<T: Float>(a: &BandedMatrix<T>, b: &[T]) -> Result<(BandedMatrix<T>, Vec<T>), BandError> {
    project(a, b, false)
}

/// Like [`symmetrize`], but moves the dropped magnitudes onto the diagonal.
pub fn symmetrize_lumped<T: Float>(a: &BandedMatrix<T>, b: &[T]) -> Result<(BandedMatrix<T>, Vec<T>), BandError> {
    project(a, b, true)
}

fn project<T: Float>(a: &BandedMatrix<T>, b: &[T], lump: bool) -> Result<(BandedMatrix<T>, Vec<T>), BandError> {
    let n = a.n();
    if b.len() != n {
        return Err(BandError::DimensionMismatch { expected: n, found: b.len() });
    }
    let mut asp = BandedMatrix::zeros(n, SYMMETRIC_BANDWIDTH)?;
    let keep = asp.half_bandwidth();
    let full = 2 * a.half_bandwidth();

    for offset in 0..=keep {
        for i in band_range(offset as isize, n) {
            let j = i + offset;
            let c = gram_entry(a, i, j);
            asp.set(i, j, c);
            if offset > 0 {
                asp.set(j, i, c);
            }
        }
    }

    if lump {
        let mut lumped = 0usize;
        for offset in keep + 1..=full {
            for i in band_range(offset as isize, n) {
                let j = i + offset;
                let c = gram_entry(a, i, j).abs();
                if c > T::zero() {
                    let di = asp.get(i, i);
                    let dj = asp.get(j, j);
                    asp.set(i, i, di + c);
                    asp.set(j, j, dj + c);
                    lumped += 1;
                }
            }
        }
        debug!("symmetrize: lumped {lumped} out-of-band pairs onto the diagonal");
    }

    let d = a.half_bandwidth();
    let mut bsp = try_zeroed(n)?;
    for (i, out) in bsp.iter_mut().enumerate() {
        let lo = i.saturating_sub(d);
        let hi = (i + d).min(n - 1);
        *out = (lo..=hi).fold(T::zero(), |acc, m| acc + a.diagonal(i as isize - m as isize)[m] * b[m]);
    }

    Ok((asp, bsp))
}
