//! Wall-clock timing of pipeline stages.
//!
//! Timings are observations only; nothing branches on them.

use std::time::{Duration, Instant};

/// Run `f` and return its result with the elapsed wall-clock time.
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Elapsed time of each pipeline stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageTimes {
    pub generate: Duration,
    pub symmetrize: Duration,
    pub decompose: Duration,
    /// `None` when no preconditioner was built.
    pub preconditioner: Option<Duration>,
    /// Total PCG loop time divided by the exact iteration count.
    pub iteration_avg: Duration,
    pub residual: Duration,
}

impl StageTimes {
    /// Average per-iteration time; zero when the loop never ran.
    pub fn average(total: Duration, iterations: usize) -> Duration {
        match u32::try_from(iterations) {
            Ok(0) => Duration::ZERO,
            Ok(it) => total / it,
            Err(_) => Duration::from_secs_f64(total.as_secs_f64() / iterations as f64),
        }
    }
}

/// Milliseconds as a float, the unit the report uses.
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1.0e3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_divides_by_exact_count() {
        assert_eq!(StageTimes::average(Duration::from_millis(10), 5), Duration::from_millis(2));
        assert_eq!(StageTimes::average(Duration::from_millis(10), 0), Duration::ZERO);
    }

    #[test]
    fn millis_converts() {
        assert!((millis(Duration::from_micros(1500)) - 1.5).abs() < 1e-12);
    }
}
