//! Hand landmark intake from JavaScript
//!
//! The JS side calls `process_hand_landmarks` once per tracked hand per
//! MediaPipe result, and `release_hand` when a hand leaves the frame.

use wasm_bindgen::prelude::*;

use crate::landmarks::{HandFrame, Handedness, LANDMARK_COUNT};

use super::engine::with_engine;

/// Called from JavaScript with a flat Float32Array of 63 values (21 × x,y,z)
/// or 84 values (21 × x,y,z,visibility)
#[wasm_bindgen]
pub fn process_hand_landmarks(
    hand_index: usize,
    flat_data: &[f32],
    handedness: &str,
    confidence: f32,
    timestamp: f64,
) {
    if flat_data.len() != LANDMARK_COUNT * 3 && flat_data.len() != LANDMARK_COUNT * 4 {
        // Still recorded; detectors treat short frames as "no event"
        web_sys::console::warn_1(
            &format!(
                "Unexpected hand landmark length: {} (expected 63 or 84)",
                flat_data.len()
            )
            .into(),
        );
    }
    let handedness = handedness.parse().unwrap_or(Handedness::Unknown);
    let frame = HandFrame::from_flat(hand_index, flat_data, timestamp).with_handedness(handedness, confidence);
    with_engine(|engine| engine.process_frame(frame));
}

/// Forget a hand that is no longer tracked
#[wasm_bindgen]
pub fn release_hand(hand_index: usize) {
    with_engine(|engine| engine.release_hand(hand_index));
}
