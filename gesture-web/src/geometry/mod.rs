//! Geometry module - stateless measurements over a hand's landmarks
//!
//! Re-exports only. All logic in submodules. Every function tolerates
//! short or empty input and returns a neutral value instead of failing.

mod angles;
mod bounds;
mod fingers;
mod motion;
mod points;

pub use angles::calculate_angle;
pub use bounds::BoundingBox;
pub use fingers::{are_fingers_spread, FingerStates, EXTENSION_MARGIN, SPREAD_THRESHOLD};
pub use motion::{wrist_velocity, Velocity};
pub use points::{centroid, distance, distance_3d, landmark_distance};
