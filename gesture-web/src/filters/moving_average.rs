//! Moving average over a fixed window
//!
//! Ring buffer of the last N samples; output is their arithmetic mean.

use std::collections::VecDeque;

use super::{Sample, SmoothingFilter};

pub struct MovingAverage<T: Sample> {
    /// Ring buffer of recent samples
    history: VecDeque<T>,
    window: usize,
}

impl<T: Sample> MovingAverage<T> {
    /// Window sizes below 1 are treated as 1
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            history: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn sample_count(&self) -> usize {
        self.history.len()
    }
}

impl<T: Sample> SmoothingFilter for MovingAverage<T> {
    type Value = T;

    fn add_sample(&mut self, value: T) {
        self.history.push_back(value);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
    }

    fn smoothed(&self) -> T {
        if self.history.is_empty() {
            return T::zero();
        }
        let sum = self.history.iter().fold(T::zero(), |acc, v| acc + *v);
        sum * (1.0 / self.history.len() as f32)
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
