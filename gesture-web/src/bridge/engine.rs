//! Engine storage and JS event delivery
//!
//! One engine per WASM instance, kept in thread-local storage (WASM is
//! single-threaded). Events are queued while the engine is borrowed and
//! handed to the JS callback afterwards, so the callback may call back into
//! this module.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::GestureConfig;
use crate::engine::{EventPayload, EventSink, GestureEngine};
use crate::error::ConfigError;
use crate::time::Clock;

// ============================================================================
// JS-SIDE COLLABORATORS
// ============================================================================

/// `performance.now()`, or `Date.now()` outside a window context
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Converts payloads to JS objects and queues them for the callback
#[derive(Default)]
pub struct JsEventSink {
    pending: Vec<(String, JsValue)>,
}

impl JsEventSink {
    fn drain(&mut self) -> Vec<(String, JsValue)> {
        std::mem::take(&mut self.pending)
    }
}

impl EventSink for JsEventSink {
    fn emit(&mut self, name: &str, payload: &EventPayload<'_>) {
        let json = match serde_json::to_string(payload) {
            Ok(json) => json,
            Err(err) => {
                web_sys::console::warn_1(&format!("Could not serialize {}: {}", name, err).into());
                return;
            }
        };
        match js_sys::JSON::parse(&json) {
            Ok(value) => self.pending.push((name.to_string(), value)),
            Err(err) => web_sys::console::warn_2(&format!("Could not parse {} payload", name).into(), &err),
        }
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// THREAD-LOCAL STATE
// ============================================================================

type JsEngine = GestureEngine<JsEventSink>;

thread_local! {
    static ENGINE: RefCell<Option<JsEngine>> = RefCell::new(None);
    static CALLBACK: RefCell<Option<js_sys::Function>> = RefCell::new(None);
    static WARNED_NO_CALLBACK: Cell<bool> = Cell::new(false);
}

fn build_engine(config: GestureConfig) -> JsEngine {
    GestureEngine::with_default_detectors(config, JsEventSink::default(), Rc::new(PerformanceClock::new()))
}

/// Run `f` on the engine (created with defaults on first use), then
/// deliver whatever events it produced
pub(crate) fn with_engine<R>(f: impl FnOnce(&mut JsEngine) -> R) -> R {
    let (result, events) = ENGINE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let engine = slot.get_or_insert_with(|| build_engine(GestureConfig::default()));
        let result = f(engine);
        (result, engine.sink_mut().drain())
    });
    dispatch(events);
    result
}

fn dispatch(events: Vec<(String, JsValue)>) {
    if events.is_empty() {
        return;
    }
    let Some(callback) = CALLBACK.with(|cell| cell.borrow().clone()) else {
        if !WARNED_NO_CALLBACK.with(|w| w.replace(true)) {
            web_sys::console::warn_1(&"Gesture events dropped: call set_event_callback() first".into());
        }
        return;
    };
    for (name, payload) in events {
        if let Err(err) = callback.call2(&JsValue::NULL, &JsValue::from_str(&name), &payload) {
            web_sys::console::error_2(&format!("Event callback threw on {}:", name).into(), &err);
        }
    }
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// (Re)create the engine, optionally from a JSON config such as
/// `{"swipe": {"velocityThreshold": 0.8}, "static": {"enabled": false}}`.
/// Missing keys take defaults. Hand histories and detector state are lost.
#[wasm_bindgen]
pub fn init_engine(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => GestureConfig::from_json(json).map_err(|err| {
            web_sys::console::error_1(&format!("Rejected gesture config: {}", err).into());
            JsValue::from(err)
        })?,
        None => GestureConfig::default(),
    };
    ENGINE.with(|cell| *cell.borrow_mut() = Some(build_engine(config)));
    crate::console_log!("Gesture engine ready (swipe, pinch, push, static)");
    Ok(())
}

/// Register `callback(eventName, payload)` for every emitted event
#[wasm_bindgen]
pub fn set_event_callback(callback: js_sys::Function) {
    CALLBACK.with(|cell| *cell.borrow_mut() = Some(callback));
    WARNED_NO_CALLBACK.with(|w| w.set(false));
}
