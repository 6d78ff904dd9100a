//! Detectors module - one state machine per gesture family
//!
//! Re-exports only. All logic in submodules.

mod debounce;
mod detector;
mod event;
mod hands;
mod pinch;
mod push;
mod static_pose;
mod swipe;

#[cfg(test)]
pub(crate) mod fixtures;

pub use debounce::Debounce;
pub use detector::{DetectorInput, DetectorState, GestureDetector};
pub use event::{
    GestureEvent, GestureKind, HorizontalDirection, PinchEvent, PinchPhase, Point2, PushDirection,
    PushEvent, StaticEvent, StaticGesture, SwipeDirection, SwipeEvent,
};
pub use hands::PerHand;
pub use pinch::{PinchDetector, DRAG_EPSILON};
pub use push::{PushDetector, DEPTH_HISTORY};
pub use static_pose::{StaticGestureDetector, OK_CIRCLE_DISTANCE, PEACE_SEPARATION};
pub use swipe::SwipeDetector;
