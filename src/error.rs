use thiserror::Error;

// Unified error type for bandpcg

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandError {
    #[error("dimension must be > 10, got {0}")]
    InvalidDimension(usize),
    #[error("number of diagonals must be odd and > 1, got {0}")]
    InvalidBandwidth(usize),
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("expected {expected} input values, found {found}")]
    IncompleteInput { expected: usize, found: usize },
    #[error("could not parse {field} from {token:?}")]
    Parse { field: &'static str, token: String },
    #[error("failed to allocate a buffer of {0} elements")]
    Allocation(usize),
    #[error("preconditioner with omega={0} not implemented (use -1 or 0.0)")]
    UnsupportedPreconditioner(f64),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
