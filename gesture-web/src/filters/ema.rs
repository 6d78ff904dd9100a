//! Exponential moving average
//!
//! state = alpha·value + (1 - alpha)·state, seeded by the first sample.

use super::{Sample, SmoothingFilter};

pub struct ExponentialMovingAverage<T: Sample> {
    alpha: f32,
    state: Option<T>,
}

impl<T: Sample> ExponentialMovingAverage<T> {
    /// `alpha` is clamped to [0, 1]; NaN falls back to 1 (no smoothing)
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            state: None,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

impl<T: Sample> SmoothingFilter for ExponentialMovingAverage<T> {
    type Value = T;

    fn add_sample(&mut self, value: T) {
        self.state = Some(match self.state {
            None => value,
            Some(prev) => value * self.alpha + prev * (1.0 - self.alpha),
        });
    }

    fn smoothed(&self) -> T {
        self.state.unwrap_or_else(T::zero)
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_sample_seeds_state() {
        let mut f = ExponentialMovingAverage::new(0.3);
        f.add_sample(10.0f32);
        assert_relative_eq!(f.smoothed(), 10.0);
    }

    #[test]
    fn test_recurrence() {
        let mut f = ExponentialMovingAverage::new(0.5);
        f.add_sample(0.0f32);
        f.add_sample(1.0);
        assert_relative_eq!(f.smoothed(), 0.5);
        f.add_sample(1.0);
        assert_relative_eq!(f.smoothed(), 0.75);
    }

    #[test]
    fn test_alpha_clamped() {
        let f: ExponentialMovingAverage<f32> = ExponentialMovingAverage::new(3.0);
        assert_eq!(f.alpha(), 1.0);
        let f: ExponentialMovingAverage<f32> = ExponentialMovingAverage::new(-1.0);
        assert_eq!(f.alpha(), 0.0);
    }

    #[test]
    fn test_empty_is_zero() {
        let mut f = ExponentialMovingAverage::new(0.3);
        assert_eq!(f.smoothed(), 0.0f32);
        f.add_sample(4.0);
        f.reset();
        assert_eq!(f.smoothed(), 0.0);
    }
}
