//! Static pose detection (OK, Peace, OpenPalm)
//!
//! Each frame is classified independently; a pose only fires after it has
//! been held for `holdDuration`, once per hold.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{merge_patch, StaticConfig, Validate};
use crate::error::{ConfigError, DetectionError};
use crate::geometry::{are_fingers_spread, landmark_distance, FingerStates};
use crate::landmarks::{HandLandmark, INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, THUMB_TIP};
use crate::time::SharedClock;

use super::debounce::Debounce;
use super::detector::{DetectorInput, DetectorState, GestureDetector};
use super::event::{GestureEvent, GestureKind, StaticEvent, StaticGesture};
use super::hands::PerHand;

/// Thumb-index tip distance below which they form the OK circle
pub const OK_CIRCLE_DISTANCE: f32 = 0.06;

/// Minimum index-middle tip separation for a peace sign
pub const PEACE_SEPARATION: f32 = 0.05;

#[derive(Default)]
struct StaticHand {
    /// Pose being held and when it was first seen
    holding: Option<(StaticGesture, f64)>,
    debounce: Debounce,
}

pub struct StaticGestureDetector {
    config: StaticConfig,
    clock: SharedClock,
    hands: PerHand<StaticHand>,
}

impl StaticGestureDetector {
    pub fn new(config: StaticConfig, clock: SharedClock) -> Self {
        Self {
            config: config.validated(),
            clock,
            hands: PerHand::new(),
        }
    }

    pub fn config(&self) -> &StaticConfig {
        &self.config
    }

    /// First matching pose in priority order OK > Peace > OpenPalm
    pub fn classify(landmarks: &[HandLandmark]) -> Option<StaticGesture> {
        if landmarks.len() < LANDMARK_COUNT {
            return None;
        }
        let fingers = FingerStates::from_landmarks(landmarks);

        let circle = landmark_distance(landmarks, THUMB_TIP, INDEX_TIP) < OK_CIRCLE_DISTANCE;
        if circle && fingers.middle && fingers.ring && fingers.pinky {
            return Some(StaticGesture::Ok);
        }

        let two_up = fingers.index && fingers.middle;
        let others_closed = !fingers.thumb && !fingers.ring && !fingers.pinky;
        let separated = landmark_distance(landmarks, INDEX_TIP, MIDDLE_TIP) > PEACE_SEPARATION;
        if two_up && others_closed && separated {
            return Some(StaticGesture::Peace);
        }

        if fingers.all_extended() && are_fingers_spread(landmarks) {
            return Some(StaticGesture::OpenPalm);
        }
        None
    }
}

impl GestureDetector for StaticGestureDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Static
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<GestureEvent>, DetectionError> {
        if !self.config.enabled {
            return Ok(None);
        }
        if !input.has_full_hand() {
            trace!("static: {} landmarks, skipping", input.landmarks.len());
            return Ok(None);
        }
        if !input.landmarks.iter().all(HandLandmark::is_finite) {
            self.hands.remove(input.hand);
            return Err(DetectionError::NonFiniteSignal { signal: "pose landmarks" });
        }

        let config = &self.config;
        let now = self.clock.now_ms();
        let hand = self.hands.entry(input.hand, StaticHand::default);
        let pose = Self::classify(input.landmarks).filter(|g| g.confidence() >= config.confidence_threshold);

        let Some(pose) = pose else {
            if let Some((lost, _)) = hand.holding.take() {
                trace!("static: {:?} lost on hand {}", lost, input.hand);
            }
            return Ok(None);
        };

        match hand.holding {
            Some((held, since)) if held == pose => {
                let hold_time = now - since;
                if hold_time < config.hold_duration || !hand.debounce.ready(now, config.debounce_ms) {
                    return Ok(None);
                }
                hand.debounce.mark(now);
                hand.holding = None;
                debug!("Static {:?} on hand {} after {:.0} ms", pose, input.hand, hold_time);
                Ok(Some(GestureEvent::Static(StaticEvent {
                    gesture: pose,
                    confidence: pose.confidence(),
                    hold_time,
                    handedness: input.handedness,
                    timestamp: now,
                })))
            }
            _ => {
                hand.holding = Some((pose, now));
                Ok(None)
            }
        }
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
        match self.hands.get(hand).and_then(|h| h.holding) {
            Some((gesture, since)) => DetectorState::Holding {
                gesture,
                held_ms: self.clock.now_ms() - since,
            },
            None => DetectorState::Idle,
        }
    }

    fn update_config(&mut self, patch: &Value) -> Result<(), ConfigError> {
        let updated = merge_patch(&self.config, patch)?;
        let disabled = self.config.enabled && !updated.enabled;
        self.config = updated;
        if disabled {
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
    use crate::detectors::fixtures::{fist, ok_sign, open_palm, peace};
    use crate::time::ManualClock;
    use std::rc::Rc;

    const FPS: f64 = 30.0;

    fn detector() -> (StaticGestureDetector, ManualClock) {
        let clock = ManualClock::new(0.0);
        (
            StaticGestureDetector::new(StaticConfig::default(), Rc::new(clock.clone())),
            clock,
        )
    }

    /// Run `frames` through the detector at 30 fps, returning (frame, event) pairs
    fn run(detector: &mut StaticGestureDetector, clock: &ManualClock, frames: &[Vec<HandLandmark>]) -> Vec<(usize, StaticEvent)> {
        let mut fired = Vec::new();
        for (k, frame) in frames.iter().enumerate() {
            clock.set(k as f64 * 1000.0 / FPS);
            if let Some(GestureEvent::Static(e)) = detector.detect(&DetectorInput::new(0, frame)).unwrap() {
                fired.push((k, e));
            }
        }
        fired
    }

    #[test]
    fn test_classify() {
        assert_eq!(StaticGestureDetector::classify(&open_palm()), Some(StaticGesture::OpenPalm));
        assert_eq!(StaticGestureDetector::classify(&peace()), Some(StaticGesture::Peace));
        assert_eq!(StaticGestureDetector::classify(&ok_sign()), Some(StaticGesture::Ok));
        assert_eq!(StaticGestureDetector::classify(&fist()), None);
        assert_eq!(StaticGestureDetector::classify(&open_palm()[..20]), None);
    }

    #[test]
    fn test_open_palm_fires_once_at_hold_duration() {
        let (mut detector, clock) = detector();
        let frames = vec![open_palm(); 30];
        let fired = run(&mut detector, &clock, &frames);

        assert_eq!(fired.len(), 1);
        let (frame, event) = &fired[0];
        // 15 frames at 30 fps = 500 ms after the first qualifying frame
        assert_eq!(*frame, 15);
        assert_eq!(event.gesture, StaticGesture::OpenPalm);
        assert_eq!(event.hold_time, 500.0);
        assert_eq!(event.confidence, 0.9);
    }

    #[test]
    fn test_interruption_restarts_hold() {
        let (mut detector, clock) = detector();
        let mut frames = vec![open_palm(); 40];
        frames[8] = fist();
        let fired = run(&mut detector, &clock, &frames);

        assert_eq!(fired.len(), 1);
        // Hold restarts at frame 9
        assert_eq!(fired[0].0, 24);
    }

    #[test]
    fn test_pose_change_restarts_hold() {
        let (mut detector, clock) = detector();
        let mut frames = vec![open_palm(); 12];
        frames.extend(vec![peace(); 20]);
        let fired = run(&mut detector, &clock, &frames);

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 27);
        assert_eq!(fired[0].1.gesture, StaticGesture::Peace);
    }

    #[test]
    fn test_sustained_pose_is_debounced() {
        let (mut detector, clock) = detector();
        // Three seconds of open palm: the hold completes well before each
        // debounce window closes
        let frames = vec![open_palm(); 90];
        let fired = run(&mut detector, &clock, &frames);
        let at: Vec<usize> = fired.iter().map(|(k, _)| *k).collect();
        assert_eq!(at, vec![15, 45, 75]);
    }

    #[test]
    fn test_confidence_threshold_filters_poses() {
        let clock = ManualClock::new(0.0);
        let config = StaticConfig {
            confidence_threshold: 0.88,
            ..Default::default()
        };
        let mut detector = StaticGestureDetector::new(config, Rc::new(clock.clone()));
        // Peace (0.85) never qualifies
        let frames = vec![peace(); 30];
        assert!(run(&mut detector, &clock, &frames).is_empty());
    }

    #[test]
    fn test_state_reports_hold() {
        let (mut detector, clock) = detector();
        run(&mut detector, &clock, &vec![open_palm(); 4]);
        assert_eq!(
            detector.state(0),
            DetectorState::Holding {
                gesture: StaticGesture::OpenPalm,
                held_ms: 100.0,
            }
        );
        detector.reset_hand(0);
        assert_eq!(detector.state(0), DetectorState::Idle);
    }

    #[test]
    fn test_nan_landmark_is_error() {
        let (mut detector, _clock) = detector();
        let mut broken = open_palm();
        broken[INDEX_TIP].y = f32::INFINITY;
        assert!(detector.detect(&DetectorInput::new(0, &broken)).is_err());
    }
}
