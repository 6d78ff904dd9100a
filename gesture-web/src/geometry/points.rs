//! Point distances and centroid

use nalgebra::Vector2;

use crate::landmarks::HandLandmark;

/// 2D Euclidean distance in normalized image space
pub fn distance(a: &HandLandmark, b: &HandLandmark) -> f32 {
    (b.xy() - a.xy()).norm()
}

/// 3D Euclidean distance, including relative depth
pub fn distance_3d(a: &HandLandmark, b: &HandLandmark) -> f32 {
    (b.xyz() - a.xyz()).norm()
}

/// 2D distance between two landmarks by index; 0 if either is missing
pub fn landmark_distance(landmarks: &[HandLandmark], a: usize, b: usize) -> f32 {
    match (landmarks.get(a), landmarks.get(b)) {
        (Some(a), Some(b)) => distance(a, b),
        _ => 0.0,
    }
}

/// Mean of all landmark positions; origin if empty
pub fn centroid(landmarks: &[HandLandmark]) -> Vector2<f32> {
    if landmarks.is_empty() {
        return Vector2::zeros();
    }
    let sum = landmarks
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f32>, l| acc + l.xy());
    sum / landmarks.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_2d_ignores_depth() {
        let a = HandLandmark::new(0.0, 0.0, 0.0);
        let b = HandLandmark::new(0.3, 0.4, 5.0);
        assert_relative_eq!(distance(&a, &b), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_3d() {
        let a = HandLandmark::new(0.0, 0.0, 0.0);
        let b = HandLandmark::new(0.0, 0.3, 0.4);
        assert_relative_eq!(distance_3d(&a, &b), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_landmark_distance_out_of_range() {
        let points = [HandLandmark::new(0.1, 0.1, 0.0)];
        assert_eq!(landmark_distance(&points, 0, 8), 0.0);
    }

    #[test]
    fn test_centroid() {
        let points = [
            HandLandmark::new(0.0, 0.0, 0.0),
            HandLandmark::new(1.0, 0.0, 0.0),
            HandLandmark::new(1.0, 1.0, 0.0),
            HandLandmark::new(0.0, 1.0, 0.0),
        ];
        let c = centroid(&points);
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert_eq!(centroid(&[]), Vector2::zeros());
    }
}
