//! Convergence bookkeeping, stage timing and instrumentation hooks.

pub mod convergence;
pub mod instrument;
pub mod timing;

pub use convergence::{Convergence, PcgOutcome, SolveStats};
pub use instrument::{CountingMarkers, Markers, NoMarkers, Regions};
pub use timing::{millis, timed, StageTimes};
