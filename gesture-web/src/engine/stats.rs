//! Rolling processing-time statistics

use std::collections::VecDeque;

/// Per-frame durations kept for the diagnostics
pub const STATS_WINDOW: usize = 60;

#[derive(Clone, Debug)]
pub struct ProcessingStats {
    samples: VecDeque<f64>,
    window: usize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new(STATS_WINDOW)
    }
}

impl ProcessingStats {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    /// Record one frame's processing time in milliseconds
    pub fn record(&mut self, duration_ms: f64) {
        self.samples.push_back(duration_ms);
        if self.samples.len() > self.window {
            self.samples.pop_front();
        }
    }

    /// Mean over the window, 0 if nothing recorded
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Max over the window, 0 if nothing recorded
    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.max(), 0.0);
    }

    #[test]
    fn test_window_drops_old_samples() {
        let mut stats = ProcessingStats::new(3);
        for ms in [10.0, 1.0, 2.0, 3.0] {
            stats.record(ms);
        }
        assert_eq!(stats.len(), 3);
        assert_relative_eq!(stats.average(), 2.0);
        assert_eq!(stats.max(), 3.0);
    }
}
