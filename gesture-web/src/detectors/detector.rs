//! The detector contract shared by every gesture family

use serde_json::Value;

use crate::error::{ConfigError, DetectionError};
use crate::landmarks::{HandLandmark, Handedness, LANDMARK_COUNT};

use super::event::{GestureEvent, GestureKind, StaticGesture};

/// Everything a detector sees for one hand in one frame
#[derive(Clone, Copy, Debug)]
pub struct DetectorInput<'a> {
    pub hand: usize,
    pub landmarks: &'a [HandLandmark],
    /// Landmarks from the hand's previous frame, if any
    pub previous: Option<&'a [HandLandmark]>,
    /// Seconds since the previous frame (0 on the first)
    pub dt: f32,
    pub handedness: Handedness,
}

impl<'a> DetectorInput<'a> {
    pub fn new(hand: usize, landmarks: &'a [HandLandmark]) -> Self {
        Self {
            hand,
            landmarks,
            previous: None,
            dt: 0.0,
            handedness: Handedness::Unknown,
        }
    }

    pub fn with_previous(mut self, previous: &'a [HandLandmark], dt: f32) -> Self {
        self.previous = Some(previous);
        self.dt = dt;
        self
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn has_full_hand(&self) -> bool {
        self.landmarks.len() >= LANDMARK_COUNT
    }

    /// Previous landmarks and a usable positive dt, or None
    pub fn motion(&self) -> Option<(&'a [HandLandmark], f32)> {
        let previous = self.previous?;
        if previous.len() < LANDMARK_COUNT || !self.dt.is_finite() || self.dt <= 0.0 {
            return None;
        }
        Some((previous, self.dt))
    }
}

/// Observable per-hand phase, for diagnostics and tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetectorState {
    Idle,
    Pinching,
    /// Samples accumulated toward a motion decision
    Tracking { samples: usize },
    Holding { gesture: StaticGesture, held_ms: f64 },
}

/// A stateful per-hand recognizer for one gesture family
///
/// `detect` is called once per hand per frame, in frame order. Frames with
/// too little data answer `Ok(None)`; `Err` means the detector's own signal
/// went bad and the caller should `reset_hand`.
pub trait GestureDetector {
    fn kind(&self) -> GestureKind;

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<GestureEvent>, DetectionError>;

    /// Drop all per-hand state (filters, phases, timers)
    fn reset(&mut self);

    /// Drop the state of one hand only
    fn reset_hand(&mut self, hand: usize);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Disabling also resets, so re-enabling never resumes a stale gesture
    fn disable(&mut self) {
        self.set_enabled(false);
        self.reset();
    }

    fn state(&self, hand: usize) -> DetectorState;

    /// Shallow-merge a JSON object of camelCase keys into the config
    fn update_config(&mut self, patch: &Value) -> Result<(), ConfigError>;

    /// Current config as JSON
    fn config_json(&self) -> Value;
}
