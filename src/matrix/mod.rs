//! Matrix module: diagonal-major banded storage and its dense view.

use crate::error::BandError;
use num_traits::Float;

pub mod banded;
pub use banded::{address, band_range, BandedMatrix};
pub mod dense;

/// Allocate a zero-filled vector of `len` elements, reporting failure as
/// [`BandError::Allocation`] instead of aborting the process.
pub fn try_zeroed<T: Float>(len: usize) -> Result<Vec<T>, BandError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| BandError::Allocation(len))?;
    v.resize(len, T::zero());
    Ok(v)
}
