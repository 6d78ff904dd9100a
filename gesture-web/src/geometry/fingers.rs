//! Finger extension and spread tests

use crate::landmarks::{HandLandmark, FINGER_JOINTS, LANDMARK_COUNT, SPREAD_TIPS, WRIST};

use super::points::distance;

/// Tip must be this much farther from the wrist than its mid joint
pub const EXTENSION_MARGIN: f32 = 1.1;

/// Mean adjacent-fingertip distance above which fingers count as spread
pub const SPREAD_THRESHOLD: f32 = 0.1;

/// Extended (true) / bent (false) per finger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// All fingers bent when fewer than 21 landmarks are present
    pub fn from_landmarks(landmarks: &[HandLandmark]) -> Self {
        if landmarks.len() < LANDMARK_COUNT {
            return Self::default();
        }
        let wrist = &landmarks[WRIST];
        let extended = |(tip, joint): (usize, usize)| {
            distance(wrist, &landmarks[tip]) > distance(wrist, &landmarks[joint]) * EXTENSION_MARGIN
        };
        let [thumb, index, middle, ring, pinky] = FINGER_JOINTS.map(extended);
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn all_extended(&self) -> bool {
        self.thumb && self.index && self.middle && self.ring && self.pinky
    }
}

/// Mean distance between adjacent fingertips (index→pinky) exceeds 0.1
pub fn are_fingers_spread(landmarks: &[HandLandmark]) -> bool {
    if landmarks.len() < LANDMARK_COUNT {
        return false;
    }
    let total: f32 = SPREAD_TIPS
        .windows(2)
        .map(|pair| distance(&landmarks[pair[0]], &landmarks[pair[1]]))
        .sum();
    total / (SPREAD_TIPS.len() - 1) as f32 > SPREAD_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::*;

    /// Upright hand, wrist at the bottom, every finger straight up and fanned out.
    fn open_hand() -> Vec<HandLandmark> {
        let mut l = vec![HandLandmark::new(0.5, 0.9, 0.0); LANDMARK_COUNT];
        l[THUMB_IP] = HandLandmark::new(0.35, 0.75, 0.0);
        l[THUMB_TIP] = HandLandmark::new(0.25, 0.65, 0.0);
        for (k, (tip, pip)) in [(INDEX_TIP, INDEX_PIP), (MIDDLE_TIP, MIDDLE_PIP), (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)]
            .into_iter()
            .enumerate()
        {
            let x = 0.35 + 0.12 * k as f32;
            l[pip] = HandLandmark::new(x, 0.6, 0.0);
            l[tip] = HandLandmark::new(x, 0.35, 0.0);
        }
        l
    }

    #[test]
    fn test_all_extended() {
        let states = FingerStates::from_landmarks(&open_hand());
        assert!(states.all_extended());
    }

    #[test]
    fn test_bent_finger() {
        let mut hand = open_hand();
        // Tip folded back toward the palm, closer to the wrist than the PIP
        hand[INDEX_TIP] = HandLandmark::new(0.35, 0.7, 0.0);
        let states = FingerStates::from_landmarks(&hand);
        assert!(!states.index);
        assert!(states.middle);
    }

    #[test]
    fn test_short_input_all_bent() {
        let states = FingerStates::from_landmarks(&open_hand()[..10]);
        assert_eq!(states, FingerStates::default());
    }

    #[test]
    fn test_spread() {
        let hand = open_hand();
        assert!(are_fingers_spread(&hand));

        let mut closed = hand.clone();
        for tip in SPREAD_TIPS {
            closed[tip].x = 0.5;
        }
        assert!(!are_fingers_spread(&closed));
        assert!(!are_fingers_spread(&hand[..5]));
    }
}
