//! Forward push detection
//!
//! Bounding-box area stands in for depth. The smoothed area is kept in a
//! short timestamped ring; a push fires when the area grows fast enough
//! relative to its current size.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{merge_patch, PushConfig, Validate};
use crate::error::{ConfigError, DetectionError};
use crate::filters::{MovingAverage, SmoothingFilter};
use crate::geometry::BoundingBox;
use crate::time::SharedClock;

use super::debounce::Debounce;
use super::detector::{DetectorInput, DetectorState, GestureDetector};
use super::event::{GestureEvent, GestureKind, PushDirection, PushEvent};
use super::hands::PerHand;

/// Smoothed-area samples kept for the depth velocity estimate
pub const DEPTH_HISTORY: usize = 10;

#[derive(Clone, Copy, Debug)]
struct DepthSample {
    area: f32,
    time_ms: f64,
}

struct PushHand {
    area: MovingAverage<f32>,
    history: VecDeque<DepthSample>,
    debounce: Debounce,
}

impl PushHand {
    fn new(config: &PushConfig) -> Self {
        Self {
            area: MovingAverage::new(config.smoothing_window),
            history: VecDeque::with_capacity(DEPTH_HISTORY + 1),
            debounce: Debounce::default(),
        }
    }
}

pub struct PushDetector {
    config: PushConfig,
    clock: SharedClock,
    hands: PerHand<PushHand>,
}

impl PushDetector {
    pub fn new(config: PushConfig, clock: SharedClock) -> Self {
        Self {
            config: config.validated(),
            clock,
            hands: PerHand::new(),
        }
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }
}

impl GestureDetector for PushDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Push
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<GestureEvent>, DetectionError> {
        if !self.config.enabled {
            return Ok(None);
        }
        if !input.has_full_hand() {
            trace!("push: {} landmarks, skipping", input.landmarks.len());
            return Ok(None);
        }
        if input.motion().is_none() {
            return Ok(None);
        }

        let config = &self.config;
        let hand = self.hands.entry(input.hand, || PushHand::new(config));
        let current_area = BoundingBox::from_landmarks(input.landmarks).area();
        hand.area.add_sample(current_area);
        let smoothed = hand.area.smoothed();
        if !smoothed.is_finite() {
            self.hands.remove(input.hand);
            return Err(DetectionError::NonFiniteSignal { signal: "hand area" });
        }

        let now = self.clock.now_ms();
        hand.history.push_back(DepthSample {
            area: smoothed,
            time_ms: now,
        });
        if hand.history.len() > DEPTH_HISTORY {
            hand.history.pop_front();
        }

        let (Some(oldest), Some(newest)) = (hand.history.front(), hand.history.back()) else {
            return Ok(None);
        };
        if hand.history.len() < 2 {
            return Ok(None);
        }
        let span_s = (newest.time_ms - oldest.time_ms) / 1000.0;
        if span_s <= 0.0 {
            return Ok(None);
        }
        let depth_change = newest.area - oldest.area;
        let velocity = depth_change / span_s as f32;
        let normalized = if current_area > 0.0 {
            depth_change / current_area
        } else {
            0.0
        };

        if normalized <= config.depth_threshold || velocity <= config.velocity_threshold {
            return Ok(None);
        }
        if !hand.debounce.ready(now, config.debounce_ms) {
            return Ok(None);
        }

        hand.debounce.mark(now);
        hand.history.clear();
        debug!(
            "Push forward on hand {} (depth {:.3}, {:.3}/s)",
            input.hand, normalized, velocity
        );
        Ok(Some(GestureEvent::Push(PushEvent {
            direction: PushDirection::Forward,
            depth: normalized,
            velocity,
            handedness: input.handedness,
            timestamp: now,
        })))
    }

    fn reset(&mut self) {
        self.hands.clear();
    }

    fn reset_hand(&mut self, hand: usize) {
        self.hands.remove(hand);
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    fn state(&self, hand: usize) -> DetectorState {
        match self.hands.get(hand) {
            Some(h) if !h.history.is_empty() => DetectorState::Tracking {
                samples: h.history.len(),
            },
            _ => DetectorState::Idle,
        }
    }

    fn update_config(&mut self, patch: &Value) -> Result<(), ConfigError> {
        let updated = merge_patch(&self.config, patch)?;
        let window_changed = updated.smoothing_window != self.config.smoothing_window;
        let disabled = self.config.enabled && !updated.enabled;
        self.config = updated;
        if window_changed || disabled {
            self.reset();
        }
        Ok(())
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }
}
