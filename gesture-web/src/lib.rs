//! Gesture Web - hand gesture recognition for MediaPipe landmark streams
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - Console logging and the panic hook
//! - Re-exports of the native API
//!
//! Recognition itself is plain Rust (`engine`, `detectors`) and runs the same
//! natively; `bridge` holds every `#[wasm_bindgen]` entry point.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}
pub(crate) use console_log;

// ============================================================================
// MODULES
// ============================================================================

pub mod bridge;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod landmarks;
pub mod time;

pub use config::GestureConfig;
pub use detectors::{GestureDetector, GestureEvent};
pub use engine::{EventSink, GestureEngine, RecordingSink};
pub use error::{ConfigError, DetectionError};
pub use landmarks::{HandFrame, HandLandmark, Handedness};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
