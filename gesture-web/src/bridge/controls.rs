//! Detector controls exposed to JavaScript

use wasm_bindgen::prelude::*;

use crate::engine::Preset;
use crate::error::ConfigError;

use super::engine::with_engine;

/// Returns false if no detector has that name
#[wasm_bindgen]
pub fn enable_detector(name: &str) -> bool {
    with_engine(|engine| engine.enable_detector(name))
}

/// Returns false if no detector has that name
#[wasm_bindgen]
pub fn disable_detector(name: &str) -> bool {
    with_engine(|engine| engine.disable_detector(name))
}

#[wasm_bindgen]
pub fn enable_all_detectors() {
    with_engine(|engine| engine.enable_all());
}

#[wasm_bindgen]
pub fn disable_all_detectors() {
    with_engine(|engine| engine.disable_all());
}

/// Clears all detector state and hand histories
#[wasm_bindgen]
pub fn reset_all_detectors() {
    with_engine(|engine| engine.reset_all());
}

/// Shallow-merge a JSON object (camelCase keys) into one detector's config
#[wasm_bindgen]
pub fn update_detector_config(name: &str, patch_json: &str) -> Result<(), JsValue> {
    let patch: serde_json::Value = serde_json::from_str(patch_json).map_err(ConfigError::from)?;
    with_engine(|engine| engine.update_detector_config(name, &patch))?;
    Ok(())
}

/// Current config of one detector as a JSON string
#[wasm_bindgen]
pub fn get_detector_config(name: &str) -> Option<String> {
    with_engine(|engine| engine.detector(name).map(|d| d.config_json().to_string()))
}

/// "navigation" (swipe only), "control" (pinch, push, static) or "all"
#[wasm_bindgen]
pub fn set_gesture_preset(name: &str) -> Result<(), JsValue> {
    let preset: Preset = name.parse()?;
    with_engine(|engine| engine.apply_preset(preset));
    Ok(())
}

/// [average, max] processing time per frame in ms over the last 60 frames
#[wasm_bindgen]
pub fn get_processing_stats() -> Vec<f64> {
    with_engine(|engine| vec![engine.average_processing_time(), engine.max_processing_time()])
}

#[wasm_bindgen]
pub fn get_detector_names() -> js_sys::Array {
    with_engine(|engine| {
        engine
            .detector_names()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    })
}
