//! Axis-aligned bounding box of a hand
//!
//! The box area doubles as a depth proxy: a hand closer to the camera
//! projects to a larger box.

use crate::landmarks::HandLandmark;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Box around all landmarks; all-zero if empty
    pub fn from_landmarks(landmarks: &[HandLandmark]) -> Self {
        let Some(first) = landmarks.first() else {
            return Self::default();
        };
        landmarks.iter().skip(1).fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, l| Self {
                min_x: b.min_x.min(l.x),
                min_y: b.min_y.min(l.y),
                max_x: b.max_x.max(l.x),
                max_y: b.max_y.max(l.y),
            },
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}
