//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod controls;
mod engine;
mod hand_landmarks;

pub use engine::{init_engine, set_event_callback, JsEventSink, PerformanceClock};

pub use hand_landmarks::{process_hand_landmarks, release_hand};

pub use controls::{
    disable_all_detectors, disable_detector, enable_all_detectors, enable_detector, get_detector_config,
    get_detector_names, get_processing_stats, reset_all_detectors, set_gesture_preset, update_detector_config,
};
