//! Core linear-algebra traits for bandpcg.

use num_traits::Float;

/// Matrix–vector product: y ← A x.
pub trait MatVec<T> {
    /// Compute y = A · x.
    fn matvec(&self, x: &[T], y: &mut [T]);

    /// Compute r = b − A · x.
    ///
    /// The default goes through [`MatVec::matvec`]; storage formats that can
    /// subtract in place override it.
    fn residual(&self, b: &[T], x: &[T], r: &mut [T])
    where
        T: Float,
    {
        self.matvec(x, r);
        for (ri, &bi) in r.iter_mut().zip(b) {
            *ri = bi - *ri;
        }
    }
}

/// Inner products & norms.
pub trait InnerProduct<T> {
    /// Compute dot(x, y).
    fn dot(&self, x: &[T], y: &[T]) -> T;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &[T]) -> T;
}

/// Uniform indexing into vectors and matrices.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}
