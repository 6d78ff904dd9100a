//! Gesture events emitted by the detectors
//!
//! Serialized field names follow the JS consumer's conventions (camelCase,
//! a `type` tag per family and an `event` tag per pinch phase).

use std::fmt;

use serde::Serialize;

use crate::landmarks::Handedness;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Swipe,
    Pinch,
    Push,
    Static,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Swipe => "swipe",
            GestureKind::Pinch => "pinch",
            GestureKind::Push => "push",
            GestureKind::Static => "static",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalDirection {
    Left,
    Right,
}

impl HorizontalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalDirection::Left => "left",
            HorizontalDirection::Right => "right",
        }
    }
}

/// Push only reports motion toward the camera
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushDirection {
    Forward,
}

impl PushDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushDirection::Forward => "forward",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticGesture {
    Ok,
    Peace,
    OpenPalm,
}

impl StaticGesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaticGesture::Ok => "ok",
            StaticGesture::Peace => "peace",
            StaticGesture::OpenPalm => "openpalm",
        }
    }

    /// Fixed confidence assigned to each recognized pose
    pub fn confidence(&self) -> f32 {
        match self {
            StaticGesture::Ok => 0.9,
            StaticGesture::Peace => 0.85,
            StaticGesture::OpenPalm => 0.9,
        }
    }
}

/// Normalized image-plane point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<nalgebra::Vector2<f32>> for Point2 {
    fn from(v: nalgebra::Vector2<f32>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEvent {
    pub direction: SwipeDirection,
    /// Smoothed wrist speed in normalized units per second
    pub velocity: f32,
    pub handedness: Handedness,
    pub timestamp: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PinchPhase {
    Start,
    End,
    Move {
        movement: Point2,
        #[serde(rename = "movementMagnitude")]
        movement_magnitude: f32,
    },
    Volume {
        direction: HorizontalDirection,
        magnitude: f32,
    },
}

impl PinchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinchPhase::Start => "start",
            PinchPhase::End => "end",
            PinchPhase::Move { .. } => "move",
            PinchPhase::Volume { .. } => "volume",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinchEvent {
    #[serde(flatten)]
    pub phase: PinchPhase,
    /// Smoothed thumb-index distance
    pub distance: f32,
    /// Index fingertip position
    pub position: Point2,
    pub handedness: Handedness,
    pub timestamp: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    pub direction: PushDirection,
    /// Normalized change of bounding-box area
    pub depth: f32,
    /// Area change per second
    pub velocity: f32,
    pub handedness: Handedness,
    pub timestamp: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticEvent {
    pub gesture: StaticGesture,
    pub confidence: f32,
    /// Milliseconds the pose was held
    pub hold_time: f64,
    pub handedness: Handedness,
    pub timestamp: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GestureEvent {
    Swipe(SwipeEvent),
    Pinch(PinchEvent),
    Push(PushEvent),
    Static(StaticEvent),
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Swipe(_) => GestureKind::Swipe,
            GestureEvent::Pinch(_) => GestureKind::Pinch,
            GestureEvent::Push(_) => GestureKind::Push,
            GestureEvent::Static(_) => GestureKind::Static,
        }
    }

    /// Direction, phase or pose name, the last segment of the event name
    pub fn qualifier(&self) -> &'static str {
        match self {
            GestureEvent::Swipe(e) => e.direction.as_str(),
            GestureEvent::Pinch(e) => e.phase.as_str(),
            GestureEvent::Push(e) => e.direction.as_str(),
            GestureEvent::Static(e) => e.gesture.as_str(),
        }
    }

    /// `gesture:<family>:<qualifier>`, e.g. `gesture:swipe:left`
    pub fn event_name(&self) -> String {
        format!("gesture:{}:{}", self.kind(), self.qualifier())
    }

    pub fn handedness(&self) -> Handedness {
        match self {
            GestureEvent::Swipe(e) => e.handedness,
            GestureEvent::Pinch(e) => e.handedness,
            GestureEvent::Push(e) => e.handedness,
            GestureEvent::Static(e) => e.handedness,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            GestureEvent::Swipe(e) => e.timestamp,
            GestureEvent::Pinch(e) => e.timestamp,
            GestureEvent::Push(e) => e.timestamp,
            GestureEvent::Static(e) => e.timestamp,
        }
    }
}
