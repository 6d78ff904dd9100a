//! Gesture engine - owns hand histories and runs every detector per frame
//!
//! ```text
//! HandFrame -> history (per hand) -> dt -> [swipe, pinch, push, static, ...]
//!                                             | event
//!                                             v
//!                          sink.emit("gesture:<family>:<qualifier>")
//!                          sink.emit("gesture:detected")
//! ```

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::GestureConfig;
use crate::detectors::{
    DetectorInput, DetectorState, GestureDetector, GestureEvent, PinchDetector, PushDetector, StaticGestureDetector,
    SwipeDetector,
};
use crate::error::ConfigError;
use crate::landmarks::HandFrame;
use crate::time::SharedClock;

use super::history::HandHistory;
use super::preset::Preset;
use super::sink::{EventPayload, EventSink};
use super::stats::ProcessingStats;

/// Generic event emitted alongside every named gesture event
pub const GESTURE_DETECTED: &str = "gesture:detected";

/// Registration names of the built-in detectors, in registration order
pub const BUILTIN_DETECTORS: [&str; 4] = ["swipe", "pinch", "push", "static"];

struct Registered {
    name: String,
    detector: Box<dyn GestureDetector>,
}

pub struct GestureEngine<S: EventSink> {
    /// Invocation order is registration order
    detectors: Vec<Registered>,
    histories: HashMap<usize, HandHistory>,
    stats: ProcessingStats,
    clock: SharedClock,
    sink: S,
}

impl<S: EventSink> GestureEngine<S> {
    /// Engine with no detectors registered
    pub fn new(sink: S, clock: SharedClock) -> Self {
        Self {
            detectors: Vec::new(),
            histories: HashMap::new(),
            stats: ProcessingStats::default(),
            clock,
            sink,
        }
    }

    /// Engine with swipe, pinch, push and static registered in that order
    pub fn with_default_detectors(config: GestureConfig, sink: S, clock: SharedClock) -> Self {
        let config = config.validated();
        let mut engine = Self::new(sink, clock.clone());
        engine.register("swipe", Box::new(SwipeDetector::new(config.swipe, clock.clone())));
        engine.register("pinch", Box::new(PinchDetector::new(config.pinch, clock.clone())));
        engine.register("push", Box::new(PushDetector::new(config.push, clock.clone())));
        engine.register(
            "static",
            Box::new(StaticGestureDetector::new(config.static_pose, clock)),
        );
        engine
    }

    /// Register a detector; an existing name is replaced in place
    pub fn register(&mut self, name: &str, detector: Box<dyn GestureDetector>) {
        match self.detectors.iter_mut().find(|r| r.name == name) {
            Some(existing) => {
                debug!("Replacing detector '{}'", name);
                existing.detector = detector;
            }
            None => {
                debug!("Registered detector '{}' ({})", name, detector.kind());
                self.detectors.push(Registered {
                    name: name.to_string(),
                    detector,
                });
            }
        }
    }

    /// Remove and return a detector
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn GestureDetector>> {
        let position = self.detectors.iter().position(|r| r.name == name)?;
        Some(self.detectors.remove(position).detector)
    }

    /// Run every enabled detector on one hand's frame
    ///
    /// Detector failures are logged and contained: the failing detector's
    /// state for this hand is reset and the remaining detectors still run.
    pub fn process_frame(&mut self, frame: HandFrame) {
        let started = self.clock.now_ms();
        let hand = frame.index;
        let handedness = frame.handedness;

        let history = self.histories.entry(hand).or_default();
        let previous_timestamp = history.latest().map_or(frame.timestamp, |f| f.timestamp);
        let dt = ((frame.timestamp - previous_timestamp) / 1000.0) as f32;
        history.push(frame);

        if let Some(current) = history.latest() {
            let mut input = DetectorInput::new(hand, &current.landmarks).with_handedness(handedness);
            if let Some(previous) = history.previous() {
                input = input.with_previous(&previous.landmarks, dt);
            }

            for entry in self.detectors.iter_mut() {
                if !entry.detector.is_enabled() {
                    continue;
                }
                match entry.detector.detect(&input) {
                    Ok(Some(event)) => emit_gesture(&mut self.sink, &entry.name, &event),
                    Ok(None) => {}
                    Err(err) => {
                        warn!("Detector '{}' failed on hand {}: {}", entry.name, hand, err);
                        entry.detector.reset_hand(hand);
                    }
                }
            }
        }

        self.stats.record(self.clock.now_ms() - started);
    }

    /// Forget a hand that is no longer tracked
    pub fn release_hand(&mut self, hand: usize) {
        self.histories.remove(&hand);
        for entry in self.detectors.iter_mut() {
            entry.detector.reset_hand(hand);
        }
        debug!("Released hand {}", hand);
    }

    /// Returns false if no detector has that name
    pub fn enable_detector(&mut self, name: &str) -> bool {
        self.detector_mut(name).map(|d| d.enable()).is_some()
    }

    /// Disabling also clears the detector's state. Returns false if unknown.
    pub fn disable_detector(&mut self, name: &str) -> bool {
        self.detector_mut(name).map(|d| d.disable()).is_some()
    }

    pub fn enable_all(&mut self) {
        for entry in self.detectors.iter_mut() {
            entry.detector.enable();
        }
    }

    pub fn disable_all(&mut self) {
        for entry in self.detectors.iter_mut() {
            entry.detector.disable();
        }
    }

    /// Returns false if no detector has that name
    pub fn reset_detector(&mut self, name: &str) -> bool {
        self.detector_mut(name).map(|d| d.reset()).is_some()
    }

    /// Reset every detector and forget all hand histories
    pub fn reset_all(&mut self) {
        for entry in self.detectors.iter_mut() {
            entry.detector.reset();
        }
        self.histories.clear();
    }

    /// Shallow-merge a JSON object into one detector's config
    pub fn update_detector_config(&mut self, name: &str, patch: &Value) -> Result<(), ConfigError> {
        let detector = self
            .detector_mut(name)
            .ok_or_else(|| ConfigError::UnknownDetector(name.to_string()))?;
        detector.update_config(patch)?;
        debug!("Updated '{}' config: {}", name, patch);
        Ok(())
    }

    /// Enable the preset's built-in detectors and disable the other built-ins
    ///
    /// Custom detectors are left alone.
    pub fn apply_preset(&mut self, preset: Preset) {
        let enabled = preset.enabled_detectors();
        for name in BUILTIN_DETECTORS {
            if enabled.contains(&name) {
                self.enable_detector(name);
            } else {
                self.disable_detector(name);
            }
        }
        info!("Applied gesture preset '{}'", preset);
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn has_detector(&self, name: &str) -> bool {
        self.detectors.iter().any(|r| r.name == name)
    }

    pub fn detector(&self, name: &str) -> Option<&dyn GestureDetector> {
        self.detectors
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.detector.as_ref())
    }

    pub fn detector_mut(&mut self, name: &str) -> Option<&mut (dyn GestureDetector + 'static)> {
        self.detectors
            .iter_mut()
            .find(|r| r.name == name)
            .map(|r| r.detector.as_mut())
    }

    /// Per-hand phase of one detector
    pub fn detector_state(&self, name: &str, hand: usize) -> Option<DetectorState> {
        self.detector(name).map(|d| d.state(hand))
    }

    pub fn history(&self, hand: usize) -> Option<&HandHistory> {
        self.histories.get(&hand)
    }

    /// Hand-track indices with stored history
    pub fn tracked_hands(&self) -> Vec<usize> {
        let mut hands: Vec<usize> = self.histories.keys().copied().collect();
        hands.sort_unstable();
        hands
    }

    /// Mean per-frame processing time over the last 60 frames (ms)
    pub fn average_processing_time(&self) -> f64 {
        self.stats.average()
    }

    /// Max per-frame processing time over the last 60 frames (ms)
    pub fn max_processing_time(&self) -> f64 {
        self.stats.max()
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

fn emit_gesture<S: EventSink>(sink: &mut S, detector: &str, event: &GestureEvent) {
    let name = event.event_name();
    debug!("Gesture {} from '{}' ({})", name, detector, event.handedness());
    sink.emit(&name, &EventPayload::gesture(event));
    sink.emit(GESTURE_DETECTED, &EventPayload::detected(detector, event));
}
