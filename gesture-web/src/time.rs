//! Monotonic time sources
//!
//! Detectors never read wall-clock time directly; they hold a shared
//! `Clock` so callers (and tests) decide what "now" means.

use std::cell::Cell;
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Monotonic milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Shared handle, detectors and the engine hold one each
pub type SharedClock = Rc<dyn Clock>;

/// Milliseconds since construction, from `std::time::Instant`
///
/// Native only; the browser build uses the bridge's `PerformanceClock`.
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClock {
    origin: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time value.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
