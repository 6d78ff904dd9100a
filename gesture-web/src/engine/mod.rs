//! Engine module - per-frame coordination of all gesture detectors
//!
//! Re-exports only. All logic in submodules.

mod coordinator;
mod history;
mod preset;
mod sink;
mod stats;

pub use coordinator::{GestureEngine, BUILTIN_DETECTORS, GESTURE_DETECTED};
pub use history::{HandHistory, HISTORY_CAPACITY};
pub use preset::Preset;
pub use sink::{EmittedEvent, EventPayload, EventSink, RecordingSink};
pub use stats::{ProcessingStats, STATS_WINDOW};

#[cfg(test)]
mod tests_proptest;
