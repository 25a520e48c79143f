//! Serial implementations of the core traits for plain slices and vectors.
//!
//! The unit type `()` acts as the inner-product provider, so solvers write
//! `let ip = (); ip.dot(&r, &z)`. Everything here is single-threaded: the
//! solver never splits work across threads.

use crate::core::traits::{Indexing, InnerProduct};
use num_traits::Float;

/// Inner product and Euclidean norm over slices.
impl<T: Float> InnerProduct<T> for () {
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        x.iter()
            .zip(y.iter())
            .fold(T::zero(), |acc, (&xi, &yi)| acc + xi * yi)
    }

    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &[T]) -> T {
        x.iter().fold(T::zero(), |acc, &xi| acc + xi * xi).sqrt()
    }
}

/// Treats a vector as a column vector.
impl<T> Indexing for Vec<T> {
    fn nrows(&self) -> usize {
        self.len()
    }
}
