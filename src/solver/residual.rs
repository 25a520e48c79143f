//! Independent residual check: ‖b − A·x‖₂ on any system.
//!
//! The pipeline runs this on the original generated matrix, not the
//! symmetrized one PCG iterated on, so the result can differ from the
//! solver's own convergence norm.

use num_traits::Float;

use crate::core::traits::{Indexing, InnerProduct, MatVec};
use crate::error::BandError;
use crate::matrix::try_zeroed;
use crate::utils::instrument::{Markers, NoMarkers, Regions};

/// ‖b − A·x‖₂.
pub fn residual_norm<M, T>(a: &M, b: &[T], x: &[T]) -> Result<T, BandError>
where
    M: MatVec<T> + Indexing,
    T: Float,
{
    residual_norm_with(a, b, x, &NoMarkers)
}

/// ‖b − A·x‖₂ with the computation bracketed by a `RESIDUAL` marker.
pub fn residual_norm_with<M, T>(a: &M, b: &[T], x: &[T], markers: &dyn Markers) -> Result<T, BandError>
where
    M: MatVec<T> + Indexing,
    T: Float,
{
    let n = a.nrows();
    for len in [b.len(), x.len()] {
        if len != n {
            return Err(BandError::DimensionMismatch { expected: n, found: len });
        }
    }
    let mut r = try_zeroed(n)?;
    markers.start(Regions::RESIDUAL);
    a.residual(b, x, &mut r);
    let norm = ().norm(&r);
    markers.stop(Regions::RESIDUAL);
    Ok(norm)
}
