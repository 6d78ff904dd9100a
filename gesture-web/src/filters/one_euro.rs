//! One Euro Filter - adaptive low-pass filter for jitter reduction
//!
//! Smooth when slow (reduces jitter), responsive when fast (less lag).
//! Needs explicit timestamps; a non-positive time step leaves state unchanged.

use std::f32::consts::PI;

use super::Sample;

/// Adaptive low-pass filter: smooth at rest, responsive during motion
pub struct OneEuroFilter<T: Sample> {
    /// Minimum cutoff frequency (Hz) - lower = smoother at rest
    min_cutoff: f32,
    /// Speed coefficient - higher = less lag during fast motion
    beta: f32,
    /// Derivative cutoff frequency (Hz)
    d_cutoff: f32,

    // State
    x_prev: Option<T>,
    dx_prev: T,
    t_prev: f64,
}

impl<T: Sample> OneEuroFilter<T> {
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        Self {
            min_cutoff: positive_or(min_cutoff, 1.0),
            beta: if beta.is_finite() { beta.max(0.0) } else { 0.0 },
            d_cutoff: positive_or(d_cutoff, 1.0),
            x_prev: None,
            dx_prev: T::zero(),
            t_prev: 0.0,
        }
    }

    /// Landmark-tuned preset: steady at rest, follows quick hand motion
    pub fn for_landmarks() -> Self {
        Self::new(1.0, 0.007, 1.0)
    }

    /// Calculate smoothing factor alpha
    fn smoothing_factor(t_e: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff * t_e;
        r / (r + 1.0)
    }

    /// Add a sample taken at `t` seconds
    pub fn add_sample(&mut self, x: T, t: f64) {
        let Some(x_prev) = self.x_prev else {
            self.x_prev = Some(x);
            self.t_prev = t;
            return;
        };

        let t_e = (t - self.t_prev) as f32;
        if t_e <= 0.0 || !t_e.is_finite() {
            return;
        }

        // Smoothed rate of change
        let a_d = Self::smoothing_factor(t_e, self.d_cutoff);
        let dx = (x - x_prev) * (1.0 / t_e);
        let dx_hat = dx * a_d + self.dx_prev * (1.0 - a_d);

        // Cutoff rises with speed
        let cutoff = self.min_cutoff + self.beta * dx_hat.magnitude();
        let a = Self::smoothing_factor(t_e, cutoff);

        self.x_prev = Some(x * a + x_prev * (1.0 - a));
        self.dx_prev = dx_hat;
        self.t_prev = t;
    }

    /// Add a sample and return the filtered value
    pub fn filter(&mut self, x: T, t: f64) -> T {
        self.add_sample(x, t);
        self.smoothed()
    }

    pub fn smoothed(&self) -> T {
        self.x_prev.unwrap_or_else(T::zero)
    }

    /// Current derivative estimate (units per second)
    pub fn velocity(&self) -> T {
        self.dx_prev
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.x_prev = None;
        self.dx_prev = T::zero();
        self.t_prev = 0.0;
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl<T: Sample> Default for OneEuroFilter<T> {
    fn default() -> Self {
        Self::for_landmarks()
    }
}
