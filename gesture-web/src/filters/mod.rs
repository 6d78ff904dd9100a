//! Filters module - stateful smoothers for noisy per-frame signals
//!
//! Re-exports only. All logic in submodules.

mod ema;
mod moving_average;
mod one_euro;
mod sample;

pub use ema::ExponentialMovingAverage;
pub use moving_average::MovingAverage;
pub use one_euro::OneEuroFilter;
pub use sample::Sample;

/// Common contract for filters that do not need timestamps
pub trait SmoothingFilter {
    type Value: Sample;

    /// Incorporate the next sample (strictly in arrival order)
    fn add_sample(&mut self, value: Self::Value);

    /// Current smoothed value, or zero if no samples yet
    fn smoothed(&self) -> Self::Value;

    fn reset(&mut self);
}

#[cfg(test)]
mod tests_proptest;
