//! Command-line or API options for a banded PCG run.
//!
//! This module provides the `SolverConfig` struct holding the five input
//! scalars of a run: dimension `n`, number of diagonals `k`, preconditioner
//! selector `omega`, iteration cap `maxit` and absolute tolerance `epsilon`.
//! The values are validated once on construction and are read-only
//! afterwards. The selector itself is decoded (and rejected if unsupported)
//! when the preconditioner is built.

use std::str::FromStr;

use crate::error::BandError;

/// Bandwidth used when the input omits `k`.
pub const DEFAULT_BANDWIDTH: usize = 7;

/// Seed of the coefficient generator unless overridden.
pub const DEFAULT_SEED: u64 = 1;

/// Validated run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    n: usize,
    k: usize,
    omega: f64,
    maxit: usize,
    epsilon: f64,
    seed: u64,
}

impl SolverConfig {
    /// Validate and build a configuration.
    ///
    /// Requires `n > 10`, `k` odd and `> 1`, `maxit > 0` and a positive,
    /// finite `epsilon`.
    pub fn new(n: usize, k: usize, omega: f64, maxit: usize, epsilon: f64) -> Result<Self, BandError> {
        if n <= 10 {
            return Err(BandError::InvalidDimension(n));
        }
        if k <= 1 || k % 2 == 0 {
            return Err(BandError::InvalidBandwidth(k));
        }
        if maxit == 0 {
            return Err(BandError::InvalidParameter { name: "maxit", value: maxit.to_string() });
        }
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(BandError::InvalidParameter { name: "epsilon", value: epsilon.to_string() });
        }
        Ok(Self { n, k, omega, maxit, epsilon, seed: DEFAULT_SEED })
    }

    /// Replace the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse whitespace-separated scalars: `n k omega maxit epsilon`, or
    /// `n omega maxit epsilon` with `k` fixed at [`DEFAULT_BANDWIDTH`].
    pub fn parse(input: &str) -> Result<Self, BandError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [n, k, omega, maxit, eps, ..] => Self::new(
                field(n, "n")?,
                field(k, "k")?,
                field(omega, "omega")?,
                field(maxit, "maxit")?,
                field(eps, "epsilon")?,
            ),
            [n, omega, maxit, eps] => Self::new(
                field(n, "n")?,
                DEFAULT_BANDWIDTH,
                field(omega, "omega")?,
                field(maxit, "maxit")?,
                field(eps, "epsilon")?,
            ),
            other => Err(BandError::IncompleteInput { expected: 5, found: other.len() }),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }
    pub fn k(&self) -> usize {
        self.k
    }
    pub fn omega(&self) -> f64 {
        self.omega
    }
    pub fn maxit(&self) -> usize {
        self.maxit
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FromStr for SolverConfig {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn field<F: FromStr>(token: &str, name: &'static str) -> Result<F, BandError> {
    token
        .parse()
        .map_err(|_| BandError::Parse { field: name, token: token.to_string() })
}
