//! Minimum spacing between a detector's successive emissions

/// Remembers when the last event fired
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Debounce {
    last_ms: Option<f64>,
}

impl Debounce {
    /// True iff at least `interval_ms` has passed since the last `mark`
    pub fn ready(&self, now_ms: f64, interval_ms: f64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms - last >= interval_ms,
        }
    }

    /// Record an emission at `now_ms`
    pub fn mark(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_debounce_is_ready() {
        assert!(Debounce::default().ready(0.0, 300.0));
    }

    #[test]
    fn test_interval() {
        let mut d = Debounce::default();
        d.mark(1000.0);
        assert!(!d.ready(1299.0, 300.0));
        assert!(d.ready(1300.0, 300.0));
    }
}
