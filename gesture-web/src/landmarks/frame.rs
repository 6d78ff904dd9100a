//! Landmark data structures
//!
//! One `HandFrame` arrives per tracked hand per processed camera frame.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A single hand landmark in normalized image space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth, wrist-origin
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

impl Default for HandLandmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 1.0,
        }
    }
}

impl HandLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, visibility: 1.0 }
    }

    pub fn xy(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    pub fn xyz(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// World-space landmark in meters (hand-centred)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Which hand the pose model believes it is looking at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = std::convert::Infallible;

    /// Anything the model reports that is not Left/Right maps to Unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            _ => Handedness::Unknown,
        })
    }
}

/// Landmarks for one tracked hand in one camera frame
///
/// Immutable once built; the coordinator takes ownership and keeps it only
/// inside the hand's history ring.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    /// Hand-track index within a multi-hand frame
    pub index: usize,
    pub landmarks: Vec<HandLandmark>,
    pub world_landmarks: Option<Vec<WorldLandmark>>,
    pub handedness: Handedness,
    /// Handedness score from the model (0-1)
    pub confidence: f32,
    /// Monotonic milliseconds
    pub timestamp: f64,
}

impl HandFrame {
    pub fn new(index: usize, landmarks: Vec<HandLandmark>, timestamp: f64) -> Self {
        Self {
            index,
            landmarks,
            world_landmarks: None,
            handedness: Handedness::Unknown,
            confidence: 0.0,
            timestamp,
        }
    }

    pub fn with_handedness(mut self, handedness: Handedness, confidence: f32) -> Self {
        self.handedness = handedness;
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_world_landmarks(mut self, world: Vec<WorldLandmark>) -> Self {
        self.world_landmarks = Some(world);
        self
    }

    /// Parse a flat Float32Array from JS.
    ///
    /// 84 values are read as x,y,z,visibility quads; anything else as x,y,z
    /// triples. A trailing partial point is dropped.
    pub fn from_flat(index: usize, flat_data: &[f32], timestamp: f64) -> Self {
        let stride = if flat_data.len() == super::LANDMARK_COUNT * 4 { 4 } else { 3 };
        let landmarks = flat_data
            .chunks_exact(stride)
            .map(|p| HandLandmark {
                x: p[0],
                y: p[1],
                z: p[2],
                visibility: if stride == 4 { p[3].clamp(0.0, 1.0) } else { 1.0 },
            })
            .collect();
        Self::new(index, landmarks, timestamp)
    }
}
