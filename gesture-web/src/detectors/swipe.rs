//! Swipe detection
//!
//! Wrist velocity smoothed with a moving average. Each swipe is an independent
//! threshold crossing, gated only by debounce.

use nalgebra::Vector2;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{merge_patch, SwipeConfig, Validate};
use crate::error::{ConfigError, DetectionError};
use crate::filters::{MovingAverage, Sample, SmoothingFilter};
use crate::geometry::wrist_velocity;
use crate::time::SharedClock;

use super::debounce::Debounce;
use super::detector::{DetectorInput, DetectorState, GestureDetector};
use super::event::{GestureEvent, GestureKind, SwipeDirection, SwipeEvent};
use super::hands::PerHand;

struct SwipeHand {
    velocity: MovingAverage<Vector2<f32>>,
    debounce: Debounce,
}

impl SwipeHand {
    fn new(config: &SwipeConfig) -> Self {
        Self {
            velocity: MovingAverage::new(config.smoothing_window),
            debounce: Debounce::default(),
        }
    }
}

pub struct SwipeDetector {
    config: SwipeConfig,
    clock: SharedClock,
    hands: PerHand<SwipeHand>,
}

impl SwipeDetector {
    pub fn new(config: SwipeConfig, clock: SharedClock) -> Self {
        Self {
            config: config.validated(),
            clock,
            hands: PerHand::new(),
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Dominant axis and its sign; None if that component is below threshold.
    /// Ties go to the vertical axis. +y points down the image.
    pub fn classify(velocity: Vector2<f32>, threshold: f32) -> Option<SwipeDirection> {
        let (abs_x, abs_y) = (velocity.x.abs(), velocity.y.abs());
        if abs_x > abs_y {
            (abs_x >= threshold).then(|| {
                if velocity.x > 0.0 {
                    SwipeDirection::Right
                } else {
                    SwipeDirection::Left
                }
            })
        } else {
            (abs_y >= threshold).then(|| {
                if velocity.y > 0.0 {
                    SwipeDirection::Down
                } else {
                    SwipeDirection::Up
                }
            })
        }
    }
}

impl GestureDetector for SwipeDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Swipe
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<GestureEvent>, DetectionError> {
        if !self.config.enabled {
            return Ok(None);
        }
        if !input.has_full_hand() {
            trace!("swipe: {} landmarks, skipping", input.landmarks.len());
            return Ok(None);
        }
        let Some((previous, dt)) = input.motion() else {
            return Ok(None);
        };

        let config = &self.config;
        let hand = self.hands.entry(input.hand, || SwipeHand::new(config));
        let velocity = wrist_velocity(input.landmarks, previous, dt);
        hand.velocity.add_sample(velocity.as_vector());
        let smoothed = hand.velocity.smoothed();
        if !smoothed.is_finite() {
            self.hands.remove(input.hand);
            return Err(DetectionError::NonFiniteSignal { signal: "wrist velocity" });
        }

        let speed = smoothed.norm();
        if speed < config.velocity_threshold {
            return Ok(None);
        }
        let now = self.clock.now_ms();
        if !hand.debounce.ready(now, config.debounce_ms) {
            return Ok(None);
        }
        let Some(direction) = Self::classify(smoothed, config.velocity_threshold) else {
            return Ok(None);
        };

        hand.debounce.mark(now);
        debug!("Swipe {:?} on hand {} ({:.2}/s)", direction, input.hand, speed);
        Ok(Some(GestureEvent::Swipe(SwipeEvent {
            direction,
            velocity: speed,
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
            Some(h) if h.velocity.sample_count() > 0 => DetectorState::Tracking {
                samples: h.velocity.sample_count(),
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
