//! Synthetic hands for detector tests
//!
//! Upright right hand, wrist at the bottom of the image (y grows downward).

use crate::landmarks::*;

/// Every finger straight and fanned out
pub fn open_palm() -> Vec<HandLandmark> {
    let mut l = vec![HandLandmark::new(0.5, 0.9, 0.0); LANDMARK_COUNT];
    l[THUMB_CMC] = HandLandmark::new(0.45, 0.85, 0.0);
    l[THUMB_MCP] = HandLandmark::new(0.4, 0.8, 0.0);
    l[THUMB_IP] = HandLandmark::new(0.35, 0.75, 0.0);
    l[THUMB_TIP] = HandLandmark::new(0.25, 0.65, 0.0);
    let fingers = [
        (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP),
        (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP),
        (RING_MCP, RING_PIP, RING_DIP, RING_TIP),
        (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP),
    ];
    for (k, (mcp, pip, dip, tip)) in fingers.into_iter().enumerate() {
        let x = 0.35 + 0.12 * k as f32;
        l[mcp] = HandLandmark::new(x, 0.7, 0.0);
        l[pip] = HandLandmark::new(x, 0.6, 0.0);
        l[dip] = HandLandmark::new(x, 0.48, 0.0);
        l[tip] = HandLandmark::new(x, 0.35, 0.0);
    }
    l
}

/// Index and middle up, thumb ring and pinky folded
pub fn peace() -> Vec<HandLandmark> {
    let mut l = open_palm();
    l[THUMB_TIP] = HandLandmark::new(0.42, 0.8, 0.0);
    l[RING_TIP] = HandLandmark::new(0.59, 0.75, 0.0);
    l[PINKY_TIP] = HandLandmark::new(0.71, 0.75, 0.0);
    l
}

/// Thumb and index tips touching, other three fingers up
pub fn ok_sign() -> Vec<HandLandmark> {
    let mut l = open_palm();
    l[THUMB_TIP] = HandLandmark::new(0.33, 0.55, 0.0);
    l[INDEX_TIP] = HandLandmark::new(0.35, 0.55, 0.0);
    l
}

/// All fingertips folded onto the palm
pub fn fist() -> Vec<HandLandmark> {
    let mut l = open_palm();
    l[THUMB_TIP] = HandLandmark::new(0.42, 0.8, 0.0);
    for (k, tip) in SPREAD_TIPS.into_iter().enumerate() {
        l[tip] = HandLandmark::new(0.35 + 0.12 * k as f32, 0.78, 0.0);
    }
    l
}

/// Whole hand shifted in the image plane
pub fn translated(hand: &[HandLandmark], dx: f32, dy: f32) -> Vec<HandLandmark> {
    hand.iter()
        .map(|p| HandLandmark::new(p.x + dx, p.y + dy, p.z))
        .collect()
}

/// Hand scaled about its own centroid (bigger = closer to the camera)
pub fn scaled(hand: &[HandLandmark], factor: f32) -> Vec<HandLandmark> {
    let n = hand.len().max(1) as f32;
    let cx = hand.iter().map(|p| p.x).sum::<f32>() / n;
    let cy = hand.iter().map(|p| p.y).sum::<f32>() / n;
    hand.iter()
        .map(|p| HandLandmark::new(cx + (p.x - cx) * factor, cy + (p.y - cy) * factor, p.z))
        .collect()
}

/// Open palm with the thumb tip placed `gap` to the left of the index tip
pub fn pinching(gap: f32) -> Vec<HandLandmark> {
    let mut l = open_palm();
    let index = l[INDEX_TIP];
    l[THUMB_TIP] = HandLandmark::new(index.x - gap, index.y, 0.0);
    l
}
