//! Joint angle calculation using dot product
//!
//! Angle at a vertex between the vectors vertex→a and vertex→b.

use crate::landmarks::HandLandmark;

/// Calculate the angle at `vertex` in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns angle in degrees:
/// - 0° = both points on the same ray
/// - 180° = straight line through the vertex
pub fn calculate_angle(a: &HandLandmark, vertex: &HandLandmark, b: &HandLandmark) -> f32 {
    let v1 = a.xy() - vertex.xy();
    let v2 = b.xy() - vertex.xy();

    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Degenerate: a point sits on the vertex
    if mag1 < f32::EPSILON || mag2 < f32::EPSILON {
        return 0.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
