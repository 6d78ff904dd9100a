//! Numeric sample types a filter can smooth

use std::ops::{Add, Mul, Sub};

use nalgebra::{Vector2, Vector3};

/// A value with vector-space arithmetic over `f32`
pub trait Sample: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {
    fn zero() -> Self;

    /// Absolute value / Euclidean norm
    fn magnitude(&self) -> f32;

    fn is_finite(&self) -> bool;
}

impl Sample for f32 {
    fn zero() -> Self {
        0.0
    }

    fn magnitude(&self) -> f32 {
        self.abs()
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Sample for Vector2<f32> {
    fn zero() -> Self {
        Vector2::zeros()
    }

    fn magnitude(&self) -> f32 {
        self.norm()
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

impl Sample for Vector3<f32> {
    fn zero() -> Self {
        Vector3::zeros()
    }

    fn magnitude(&self) -> f32 {
        self.norm()
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}
