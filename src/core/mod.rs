//! Core linear-algebra traits and their slice implementations.

pub mod traits;
pub mod wrappers;

pub use traits::{Indexing, InnerProduct, MatVec};
