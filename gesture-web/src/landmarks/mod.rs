//! Landmark module - per-frame hand data from the pose model
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod indices;

pub use frame::{HandFrame, HandLandmark, Handedness, WorldLandmark};
pub use indices::*;
