//! Pseudo-random banded test systems.
//!
//! Coefficients are uniform in `[0, 1)` and scaled: principal-diagonal
//! entries by `2k` (biasing the matrix toward diagonal dominance),
//! off-diagonal entries by 1, right-hand-side entries by `4k`. The
//! generator owns its RNG, so two generators built from the same seed
//! produce identical systems.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BandError;
use crate::matrix::{try_zeroed, BandedMatrix};

/// Seeded source of banded systems.
pub struct SystemGenerator {
    rng: StdRng,
}

impl SystemGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Use an already positioned RNG.
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    fn coefficient(&mut self, row: usize, col: usize, k: usize) -> f64 {
        let scale = if row == col { (k << 1) as f64 } else { 1.0 };
        scale * self.rng.r#gen::<f64>()
    }

    fn rhs_entry(&mut self, k: usize) -> f64 {
        (k << 2) as f64 * self.rng.r#gen::<f64>()
    }

    /// Generate `A` (n×n, k diagonals) and `b` (length n).
    ///
    /// The matrix is filled one diagonal at a time, lowest offset first,
    /// then `b` in row order.
    pub fn generate(&mut self, n: usize, k: usize) -> Result<(BandedMatrix<f64>, Vec<f64>), BandError> {
        let a = BandedMatrix::from_fn(n, k, |i, j| self.coefficient(i, j, k))?;
        let mut b = try_zeroed(n)?;
        for bi in b.iter_mut() {
            *bi = self.rhs_entry(k);
        }
        debug!("generated banded system n={n} k={k}");
        Ok((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_system() {
        let (a1, b1) = SystemGenerator::new(42).generate(20, 7).unwrap();
        let (a2, b2) = SystemGenerator::new(42).generate(20, 7).unwrap();
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        let (a3, _) = SystemGenerator::new(43).generate(20, 7).unwrap();
        assert_ne!(a1, a3);
    }

    #[test]
    fn positioned_rng_continues_the_stream() {
        let mut generator = SystemGenerator::new(9);
        let _ = generator.generate(12, 3).unwrap();
        let second = generator.generate(12, 3).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        // in-band slots of offsets -1, 0, +1, then the 12 rhs entries
        for _ in 0..(11 + 12 + 11 + 12) {
            let _: f64 = rng.r#gen();
        }
        let resumed = SystemGenerator::from_rng(rng).generate(12, 3).unwrap();
        assert_eq!(second, resumed);
    }

    #[test]
    fn coefficients_respect_scaling() {
        let k = 5;
        let (a, b) = SystemGenerator::new(7).generate(30, k).unwrap();
        for i in 0..30 {
            for j in 0..30 {
                let v = a.get(i, j);
                let bound = if i == j { 2.0 * k as f64 } else { 1.0 };
                assert!((0.0..bound).contains(&v));
                if i.abs_diff(j) > 2 {
                    assert_eq!(v, 0.0);
                }
            }
        }
        assert!(b.iter().all(|&v| (0.0..4.0 * k as f64).contains(&v)));
    }

    #[test]
    fn out_of_band_slots_stay_zero() {
        let (a, _) = SystemGenerator::new(3).generate(15, 3).unwrap();
        // row 0 of the sub-diagonal and the last row of the super-diagonal
        assert_eq!(a.diagonal(-1)[0], 0.0);
        assert_eq!(a.diagonal(1)[14], 0.0);
    }
}
