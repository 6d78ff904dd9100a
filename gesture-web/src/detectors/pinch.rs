//! Pinch detection
//!
//! Thumb-index distance is smoothed with an EMA and drives a two-phase
//! machine with hysteresis:
//!
//! ```text
//! idle --(d < distanceThreshold)--> active --(d > releaseThreshold)--> idle
//!        emits start                         emits end
//! ```
//!
//! While active, index-tip displacement emits move or volume events.

use nalgebra::Vector2;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{merge_patch, PinchConfig, Validate};
use crate::error::{ConfigError, DetectionError};
use crate::filters::{ExponentialMovingAverage, SmoothingFilter};
use crate::geometry::distance;
use crate::landmarks::{INDEX_TIP, THUMB_TIP};
use crate::time::SharedClock;

use super::debounce::Debounce;
use super::detector::{DetectorInput, DetectorState, GestureDetector};
use super::event::{GestureEvent, GestureKind, HorizontalDirection, PinchEvent, PinchPhase};
use super::hands::PerHand;

/// Index-tip travel per frame above which an active pinch counts as a drag
pub const DRAG_EPSILON: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Active { last_position: Vector2<f32> },
}

struct PinchHand {
    distance: ExponentialMovingAverage<f32>,
    phase: Phase,
    debounce: Debounce,
}

impl PinchHand {
    fn new(config: &PinchConfig) -> Self {
        Self {
            distance: ExponentialMovingAverage::new(config.smoothing_alpha),
            phase: Phase::Idle,
            debounce: Debounce::default(),
        }
    }
}

pub struct PinchDetector {
    config: PinchConfig,
    clock: SharedClock,
    hands: PerHand<PinchHand>,
}

impl PinchDetector {
    pub fn new(config: PinchConfig, clock: SharedClock) -> Self {
        Self {
            config: config.validated(),
            clock,
            hands: PerHand::new(),
        }
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    pub fn is_pinching(&self, hand: usize) -> bool {
        matches!(self.hands.get(hand), Some(h) if h.phase != Phase::Idle)
    }
}

impl GestureDetector for PinchDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<GestureEvent>, DetectionError> {
        if !self.config.enabled {
            return Ok(None);
        }
        if !input.has_full_hand() {
            trace!("pinch: {} landmarks, skipping", input.landmarks.len());
            return Ok(None);
        }

        let config = &self.config;
        let hand = self.hands.entry(input.hand, || PinchHand::new(config));
        let thumb = &input.landmarks[THUMB_TIP];
        let index = &input.landmarks[INDEX_TIP];
        hand.distance.add_sample(distance(thumb, index));
        let smoothed = hand.distance.smoothed();
        if !smoothed.is_finite() {
            self.hands.remove(input.hand);
            return Err(DetectionError::NonFiniteSignal { signal: "pinch distance" });
        }

        let position = index.xy();
        let now = self.clock.now_ms();
        let current = hand.phase;
        let phase = match current {
            Phase::Idle => {
                if smoothed >= config.distance_threshold {
                    return Ok(None);
                }
                if !hand.debounce.ready(now, config.debounce_ms) {
                    trace!("pinch start on hand {} debounced", input.hand);
                    return Ok(None);
                }
                hand.debounce.mark(now);
                hand.phase = Phase::Active {
                    last_position: position,
                };
                debug!("Pinch started on hand {} (d={:.3})", input.hand, smoothed);
                PinchPhase::Start
            }
            Phase::Active { .. } if smoothed > config.release_threshold => {
                hand.phase = Phase::Idle;
                debug!("Pinch ended on hand {} (d={:.3})", input.hand, smoothed);
                PinchPhase::End
            }
            Phase::Active { last_position } => {
                let movement = position - last_position;
                hand.phase = Phase::Active {
                    last_position: position,
                };
                let magnitude = movement.norm();
                if magnitude > DRAG_EPSILON {
                    PinchPhase::Move {
                        movement: movement.into(),
                        movement_magnitude: magnitude,
                    }
                } else if movement.x.abs() > config.volume_threshold && movement.x.abs() > movement.y.abs() {
                    PinchPhase::Volume {
                        direction: if movement.x > 0.0 {
                            HorizontalDirection::Right
                        } else {
                            HorizontalDirection::Left
                        },
                        magnitude: movement.x.abs(),
                    }
                } else {
                    return Ok(None);
                }
            }
        };

        Ok(Some(GestureEvent::Pinch(PinchEvent {
            phase,
            distance: smoothed,
            position: position.into(),
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
        if self.is_pinching(hand) {
            DetectorState::Pinching
        } else {
            DetectorState::Idle
        }
    }

    fn update_config(&mut self, patch: &Value) -> Result<(), ConfigError> {
        let updated = merge_patch(&self.config, patch)?;
        let alpha_changed = updated.smoothing_alpha != self.config.smoothing_alpha;
        let disabled = self.config.enabled && !updated.enabled;
        self.config = updated;
        if alpha_changed || disabled {
            self.reset();
        }
        Ok(())
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{open_palm, pinching, translated};
    use crate::landmarks::HandLandmark;
    use crate::time::ManualClock;
    use approx::assert_relative_eq;
    use std::rc::Rc;

    /// alpha = 1 so the smoothed distance equals the raw one
    fn unsmoothed() -> (PinchDetector, ManualClock) {
        let clock = ManualClock::new(0.0);
        let config = PinchConfig {
            smoothing_alpha: 1.0,
            ..Default::default()
        };
        (PinchDetector::new(config, Rc::new(clock.clone())), clock)
    }

    fn phase_of(event: Option<GestureEvent>) -> Option<&'static str> {
        event.map(|e| e.qualifier())
    }

    fn feed(detector: &mut PinchDetector, clock: &ManualClock, hand: &[HandLandmark]) -> Option<&'static str> {
        clock.advance(33.0);
        phase_of(detector.detect(&DetectorInput::new(0, hand)).unwrap())
    }

    #[test]
    fn test_hysteresis() {
        let (mut pinch, clock) = unsmoothed();
        let phases: Vec<_> = [0.10, 0.04, 0.06, 0.04, 0.09]
            .into_iter()
            .map(|gap| feed(&mut pinch, &clock, &pinching(gap)))
            .collect();
        assert_eq!(phases, vec![None, Some("start"), None, None, Some("end")]);
        assert_eq!(pinch.state(0), DetectorState::Idle);
    }

    #[test]
    fn test_drag_emits_move() {
        let (mut pinch, clock) = unsmoothed();
        let held = pinching(0.02);
        assert_eq!(feed(&mut pinch, &clock, &held), Some("start"));
        assert_eq!(pinch.state(0), DetectorState::Pinching);

        let dragged = translated(&held, 0.01, 0.0);
        let event = pinch.detect(&DetectorInput::new(0, &dragged)).unwrap();
        match event {
            Some(GestureEvent::Pinch(PinchEvent {
                phase: PinchPhase::Move {
                    movement,
                    movement_magnitude,
                },
                ..
            })) => {
                assert_relative_eq!(movement.x, 0.01, epsilon = 1e-5);
                assert_relative_eq!(movement.y, 0.0, epsilon = 1e-5);
                assert_relative_eq!(movement_magnitude, 0.01, epsilon = 1e-5);
            }
            other => panic!("expected move, got {:?}", other),
        }

        // Holding still while pinched is silent
        assert_eq!(feed(&mut pinch, &clock, &dragged), None);
    }

    #[test]
    fn test_small_horizontal_step_is_volume() {
        let clock = ManualClock::new(0.0);
        let config = PinchConfig {
            smoothing_alpha: 1.0,
            volume_threshold: 0.001,
            ..Default::default()
        };
        let mut pinch = PinchDetector::new(config, Rc::new(clock.clone()));
        let held = pinching(0.02);
        assert_eq!(feed(&mut pinch, &clock, &held), Some("start"));

        let nudged = translated(&held, -0.004, 0.0);
        match pinch.detect(&DetectorInput::new(0, &nudged)).unwrap() {
            Some(GestureEvent::Pinch(PinchEvent {
                phase: PinchPhase::Volume { direction, magnitude },
                ..
            })) => {
                assert_eq!(direction, HorizontalDirection::Left);
                assert_relative_eq!(magnitude, 0.004, epsilon = 1e-5);
            }
            other => panic!("expected volume, got {:?}", other),
        }
    }

    #[test]
    fn test_start_is_debounced() {
        let (mut pinch, clock) = unsmoothed();
        let closed = pinching(0.02);
        let open = pinching(0.2);
        assert_eq!(feed(&mut pinch, &clock, &closed), Some("start"));
        assert_eq!(feed(&mut pinch, &clock, &open), Some("end"));
        // 66 ms after the first start
        assert_eq!(feed(&mut pinch, &clock, &closed), None);
        assert_eq!(pinch.state(0), DetectorState::Idle);
        // 99 ms
        assert_eq!(feed(&mut pinch, &clock, &closed), None);
        // 132 ms
        assert_eq!(feed(&mut pinch, &clock, &closed), Some("start"));
    }

    #[test]
    fn test_ema_smoothing_delays_start() {
        let clock = ManualClock::new(0.0);
        let mut pinch = PinchDetector::new(PinchConfig::default(), Rc::new(clock.clone()));
        // 0.2 then 0.0: 0.3 * 0 + 0.7 * 0.2 = 0.14, still open
        assert_eq!(feed(&mut pinch, &clock, &pinching(0.2)), None);
        assert_eq!(feed(&mut pinch, &clock, &pinching(0.0)), None);
        let mut started = false;
        for _ in 0..10 {
            if feed(&mut pinch, &clock, &pinching(0.0)) == Some("start") {
                started = true;
                break;
            }
        }
        assert!(started);
    }

    #[test]
    fn test_hands_are_independent() {
        let (mut pinch, _clock) = unsmoothed();
        let closed = pinching(0.02);
        let open = open_palm();
        assert!(pinch.detect(&DetectorInput::new(0, &closed)).unwrap().is_some());
        assert!(pinch.detect(&DetectorInput::new(1, &open)).unwrap().is_none());
        assert!(pinch.is_pinching(0));
        assert!(!pinch.is_pinching(1));
    }

    #[test]
    fn test_short_input() {
        let (mut pinch, _clock) = unsmoothed();
        let closed = pinching(0.02);
        assert!(pinch.detect(&DetectorInput::new(0, &closed[..9])).unwrap().is_none());
    }

    #[test]
    fn test_disable_clears_active_pinch() {
        let (mut pinch, clock) = unsmoothed();
        assert_eq!(feed(&mut pinch, &clock, &pinching(0.02)), Some("start"));
        pinch.disable();
        assert!(!pinch.is_pinching(0));
        pinch.enable();
        clock.advance(200.0);
        assert_eq!(feed(&mut pinch, &clock, &pinching(0.02)), Some("start"));
    }

    #[test]
    fn test_nan_distance() {
        let (mut pinch, _clock) = unsmoothed();
        let mut broken = pinching(0.02);
        broken[THUMB_TIP].x = f32::NAN;
        assert!(pinch.detect(&DetectorInput::new(0, &broken)).is_err());
        // Next good frame starts from a clean filter
        assert!(pinch.detect(&DetectorInput::new(0, &pinching(0.02))).unwrap().is_some());
    }
}
