//! Wrist velocity between consecutive frames

use nalgebra::Vector2;

use crate::landmarks::{HandLandmark, WRIST};

/// Per-frame wrist velocity in normalized units per second
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub magnitude: f32,
}

impl Velocity {
    pub fn from_vector(v: Vector2<f32>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            magnitude: v.norm(),
        }
    }

    pub fn as_vector(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

/// Velocity of the wrist (landmark 0) from `previous` to `current`
///
/// Zero when either frame lacks a wrist or `dt` is not positive.
pub fn wrist_velocity(current: &[HandLandmark], previous: &[HandLandmark], dt: f32) -> Velocity {
    if dt <= 0.0 || !dt.is_finite() {
        return Velocity::default();
    }
    match (current.get(WRIST), previous.get(WRIST)) {
        (Some(now), Some(before)) => Velocity::from_vector((now.xy() - before.xy()) / dt),
        _ => Velocity::default(),
    }
}
