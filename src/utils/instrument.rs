//! Performance-counter style region markers.
//!
//! A [`Markers`] hook brackets the instrumented regions of a solve: the PCG
//! iteration loop, each banded mat-vec inside it, and the residual
//! evaluation. The default hook does nothing. Hooks only observe; they never
//! see or change the vectors being computed.

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;

bitflags! {
    /// Instrumented regions.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Regions: u8 {
        /// The whole PCG iteration loop.
        const PCG_LOOP = 0b001;
        /// One banded mat-vec inside the loop.
        const MATVEC   = 0b010;
        /// The independent residual evaluation.
        const RESIDUAL = 0b100;
    }
}

/// Region start/stop hook.
pub trait Markers {
    fn start(&self, _region: Regions) {}
    fn stop(&self, _region: Regions) {}
}

/// Instrumentation disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarkers;

impl Markers for NoMarkers {}

/// Share one hook between the solver and the caller that reads it back.
impl<M: Markers + ?Sized> Markers for Rc<M> {
    fn start(&self, region: Regions) {
        (**self).start(region)
    }
    fn stop(&self, region: Regions) {
        (**self).stop(region)
    }
}

/// Counts region entries for the enabled regions and traces them.
#[derive(Debug, Default)]
pub struct CountingMarkers {
    enabled: Regions,
    pcg_loop: Cell<usize>,
    matvec: Cell<usize>,
    residual: Cell<usize>,
    open: Cell<Regions>,
}

impl CountingMarkers {
    pub fn new(enabled: Regions) -> Self {
        Self { enabled, ..Self::default() }
    }

    /// Number of completed entries into `region` (a single flag).
    pub fn count(&self, region: Regions) -> usize {
        self.counter(region).map_or(0, Cell::get)
    }

    /// Regions started but not yet stopped.
    pub fn open(&self) -> Regions {
        self.open.get()
    }

    fn counter(&self, region: Regions) -> Option<&Cell<usize>> {
        if region == Regions::PCG_LOOP {
            Some(&self.pcg_loop)
        } else if region == Regions::MATVEC {
            Some(&self.matvec)
        } else if region == Regions::RESIDUAL {
            Some(&self.residual)
        } else {
            None
        }
    }
}

impl Markers for CountingMarkers {
    fn start(&self, region: Regions) {
        if self.enabled.contains(region) {
            self.open.set(self.open.get() | region);
            log::trace!("marker start {region:?}");
        }
    }

    fn stop(&self, region: Regions) {
        if self.enabled.contains(region) {
            self.open.set(self.open.get() - region);
            if let Some(c) = self.counter(region) {
                c.set(c.get() + 1);
            }
            log::trace!("marker stop {region:?}");
        }
    }
}
